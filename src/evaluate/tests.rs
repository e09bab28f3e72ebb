use super::*;
use crate::board::ApplyMode;
use crate::{chess_position, std_move};
use common::square::*;

fn back_rank_mate_setup() -> BoardState {
    chess_position! {
        ......k.
        .....ppp
        ........
        ........
        ........
        ........
        ........
        R.....K.
    }
}

#[test]
fn test_checkmate_is_scored_for_the_max_side() {
    let board = back_rank_mate_setup();
    let mated = board
        .apply(&std_move!(A1, A8, Rook), ApplyMode::Bare)
        .unwrap();
    assert_eq!(game_ending(&mated), Some(GameEnding::Checkmate));
    assert_eq!(utility(&mated, false, Strategy::MaterialOnly), CHECKMATE_VALUE);

    let from_black = mated.with_max_side(Color::Black);
    assert_eq!(
        utility(&from_black, false, Strategy::FullHeuristic),
        -CHECKMATE_VALUE
    );
}

#[test]
fn test_stalemate_is_a_draw() {
    let mut board = chess_position! {
        k.......
        ........
        .Q......
        ........
        ........
        ........
        ........
        ..K.....
    };
    board.set_turn(Color::Black);
    assert_eq!(game_ending(&board), Some(GameEnding::Stalemate));
    assert_eq!(utility(&board, false, Strategy::FullHeuristic), DRAW_VALUE);
}

#[test]
fn test_repetition_is_a_draw() {
    let shuffle = [
        std_move!(G1, F3, Knight),
        std_move!(G8, F6, Knight),
        std_move!(F3, G1, Knight),
        std_move!(F6, G8, Knight),
    ];
    let mut board = BoardState::starting_position();
    for chess_move in shuffle.iter().chain(shuffle.iter()) {
        board = board.apply(chess_move, ApplyMode::Bare).unwrap();
    }
    assert_eq!(game_ending(&board), Some(GameEnding::Draw));
    assert_eq!(utility(&board, true, Strategy::FullHeuristic), DRAW_VALUE);
}

#[test]
fn test_material_only_returns_the_differential() {
    let board = chess_position! {
        ....k...
        ........
        ........
        ........
        ........
        ........
        ........
        ...QK...
    };
    assert_eq!(utility(&board, false, Strategy::MaterialOnly), 9000);
    let from_black = board.with_max_side(Color::Black);
    assert_eq!(utility(&from_black, false, Strategy::MaterialOnly), -9000);
}

#[test]
fn test_full_heuristic_on_starting_position() {
    let board = BoardState::starting_position();
    assert_eq!(utility(&board, false, Strategy::FullHeuristic), 0);
    // only the max side gets the development nudge on the e, f and g files
    assert_eq!(utility(&board, true, Strategy::FullHeuristic), -30);
}

#[test]
fn test_parse_strategy() {
    assert_eq!("full".parse::<Strategy>(), Ok(Strategy::FullHeuristic));
    assert_eq!("0".parse::<Strategy>(), Ok(Strategy::FullHeuristic));
    assert_eq!("material".parse::<Strategy>(), Ok(Strategy::MaterialOnly));
    assert_eq!("1".parse::<Strategy>(), Ok(Strategy::MaterialOnly));
    assert!("2".parse::<Strategy>().is_err());
    assert_eq!(Strategy::default(), Strategy::FullHeuristic);
}
