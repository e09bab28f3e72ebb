use super::*;
use crate::evaluate::Strategy;
use crate::{chess_position, std_move};
use common::square::*;

fn play(state: &BoardState, chess_move: ChessMove) -> BoardState {
    state.apply(&chess_move, ApplyMode::Bare).unwrap()
}

#[test]
fn test_starting_position_matches_diagram() {
    let board = BoardState::starting_position();
    let diagram = chess_position! {
        rnbqkbnr
        pppppppp
        ........
        ........
        ........
        ........
        PPPPPPPP
        RNBQKBNR
    };
    for square in Square::all() {
        assert_eq!(board.get(square), diagram.get(square), "mismatch on {}", square);
    }
    assert_eq!(board.side(Color::White).pieces().len(), 16);
    assert_eq!(board.side(Color::Black).pieces().len(), 16);
    assert_eq!(board.king_square(Color::Black), Some(E8));
    assert_eq!(board.material_difference(), 0);
}

#[test]
fn test_pawns_are_generated_first() {
    let board = BoardState::starting_position();
    let kinds: Vec<_> = board
        .side(Color::White)
        .pieces()
        .iter()
        .map(|piece| piece.kind)
        .collect();
    assert!(kinds[..8].iter().all(|&kind| kind == PieceKind::Pawn));
    assert_eq!(kinds[15], PieceKind::King);
}

#[test]
fn test_put_rejects_occupied_square() {
    let mut board = BoardState::new();
    board.put(E4, PieceKind::Queen, Color::White).unwrap();
    assert_eq!(
        board.put(E4, PieceKind::Rook, Color::Black),
        Err(BoardError::SquareOccupiedBoardPutError { square: E4 })
    );
}

#[test]
fn test_apply_leaves_parent_untouched() {
    let board = BoardState::starting_position();
    let next = play(&board, std_move!(E2, E4, Pawn));

    assert_eq!(board.get(E2), Some((Color::White, PieceKind::Pawn)));
    assert_eq!(board.get(E4), None);
    assert_eq!(board.turn(), Color::White);
    assert!(board.recent_moves().is_empty());
    assert!(!board.piece_at(E2).unwrap().has_moved);

    assert_eq!(next.get(E2), None);
    assert_eq!(next.get(E4), Some((Color::White, PieceKind::Pawn)));
    assert_eq!(next.turn(), Color::Black);
    assert!(next.piece_at(E4).unwrap().has_moved);
    assert_eq!(next.last_move(), Some(&std_move!(E2, E4, Pawn)));
}

#[test]
fn test_apply_from_empty_square_fails() {
    let board = BoardState::starting_position();
    let result = board.apply(&std_move!(E4, E5, Pawn), ApplyMode::Bare);
    assert_eq!(
        result.err(),
        Some(BoardError::FromSquareIsEmptyMoveApplicationError { square: E4 })
    );
}

#[test]
fn test_capture_updates_material_from_max_side_view() {
    let board = chess_position! {
        ....k...
        ........
        ........
        ...r....
        ....P...
        ........
        ........
        ....K...
    };
    assert_eq!(board.material_difference(), 1000 - 5000);

    let captured = play(&board, std_move!(E4, D5, Pawn));
    assert_eq!(captured.material_difference(), 1000);
    assert_eq!(captured.get(D5), Some((Color::White, PieceKind::Pawn)));

    let black_view = board.clone().with_max_side(Color::Black);
    assert_eq!(black_view.material_difference(), 4000);
    let captured = play(&black_view, std_move!(E4, D5, Pawn));
    assert_eq!(captured.material_difference(), -1000);
}

#[test]
fn test_recent_move_window_is_bounded() {
    let mut board = BoardState::starting_position();
    let shuffle = [
        std_move!(G1, F3, Knight),
        std_move!(G8, F6, Knight),
        std_move!(F3, G1, Knight),
        std_move!(F6, G8, Knight),
    ];
    for _ in 0..3 {
        for chess_move in shuffle.iter() {
            board = play(&board, *chess_move);
        }
    }
    assert_eq!(board.recent_moves().len(), RECENT_MOVE_WINDOW);
}

#[test]
fn test_repeated_four_move_sequence_is_a_draw() {
    let mut board = BoardState::starting_position();
    let shuffle = [
        std_move!(G1, F3, Knight),
        std_move!(G8, F6, Knight),
        std_move!(F3, G1, Knight),
        std_move!(F6, G8, Knight),
    ];
    for chess_move in shuffle.iter() {
        board = play(&board, *chess_move);
    }
    assert!(!board.is_draw());
    for (i, chess_move) in shuffle.iter().enumerate() {
        board = play(&board, *chess_move);
        assert_eq!(board.is_draw(), i == 3);
    }
}

#[test]
fn test_varied_eight_moves_are_not_a_draw() {
    let mut board = BoardState::starting_position();
    let moves = [
        std_move!(G1, F3, Knight),
        std_move!(G8, F6, Knight),
        std_move!(F3, G1, Knight),
        std_move!(F6, G8, Knight),
        std_move!(B1, C3, Knight),
        std_move!(G8, F6, Knight),
        std_move!(C3, B1, Knight),
        std_move!(F6, G8, Knight),
    ];
    for chess_move in moves.iter() {
        board = play(&board, *chess_move);
    }
    assert!(!board.is_draw());
}

#[test]
fn test_terminal_check_marks_checkmate() {
    let board = chess_position! {
        .......k
        ......pp
        ........
        ........
        ........
        ........
        ........
        R...K...
    };
    let mate = board
        .apply(&std_move!(A1, A8, Rook), ApplyMode::TerminalCheck)
        .unwrap();
    assert!(mate.is_terminal());
    assert_eq!(mate.utility(), crate::evaluate::CHECKMATE_VALUE);

    let quiet = board
        .apply(&std_move!(A1, A2, Rook), ApplyMode::TerminalCheck)
        .unwrap();
    assert!(!quiet.is_terminal());
}

#[test]
fn test_evaluate_mode_records_swing() {
    let board = chess_position! {
        ....k...
        ........
        ........
        ...q....
        ....P...
        ........
        ........
        ....K...
    };
    let mode = ApplyMode::evaluate_from(&board, Strategy::MaterialOnly, false);
    let captured = board.apply(&std_move!(E4, D5, Pawn), mode).unwrap();
    assert_eq!(captured.utility(), 1000);
    assert_eq!(captured.quiescent_change(), 9000);
    assert!(!captured.is_terminal());
}

#[test]
fn test_display() {
    let board = BoardState::starting_position();
    let rendered = board.to_string();
    assert!(rendered.contains(" 8 | r  n  b  q  k  b  n  r |"));
    assert!(rendered.contains(" 1 | R  N  B  Q  K  B  N  R |"));
}
