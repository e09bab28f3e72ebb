//! Legal move generation.
//!
//! Candidates are generated per piece kind, in the order the side's pieces are
//! stored, and each one is kept only if playing it leaves the mover's king
//! unattacked. Nothing is precomputed: rays are walked square by square.

use log::trace;
use smallvec::SmallVec;

use common::Square;

use crate::board::color::Color;
use crate::board::piece::{Piece, PieceKind};
use crate::board::{ApplyMode, BoardState};
use crate::chess_move::ChessMove;

use super::attacks::{attacked, in_check, DIAGONALS, KNIGHT_OFFSETS, ORTHOGONALS};

/// A list of chess moves that is optimized for small sizes.
pub type ChessMoveList = SmallVec<[ChessMove; 32]>;

const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Returns every legal move for the side to move. With `existence_only` the
/// list is cut short as soon as one legal move is found, which is all the
/// terminal and draw checks need.
pub fn legal_moves(state: &BoardState, existence_only: bool) -> ChessMoveList {
    let mover = state.turn();
    let mut moves = ChessMoveList::new();
    let mut candidates = ChessMoveList::new();

    for piece in state.side(mover).pieces() {
        candidates.clear();
        match piece.kind {
            PieceKind::King => king_moves(state, piece, &mut candidates),
            PieceKind::Queen => {
                sliding_moves(state, piece, &ORTHOGONALS, &mut candidates);
                sliding_moves(state, piece, &DIAGONALS, &mut candidates);
            }
            PieceKind::Rook => sliding_moves(state, piece, &ORTHOGONALS, &mut candidates),
            PieceKind::Bishop => sliding_moves(state, piece, &DIAGONALS, &mut candidates),
            PieceKind::Knight => knight_moves(state, piece, &mut candidates),
            PieceKind::Pawn => pawn_moves(state, piece, &mut candidates),
        }

        for candidate in candidates.iter() {
            if leaves_king_safe(state, candidate) {
                moves.push(*candidate);
                if existence_only {
                    return moves;
                }
            }
        }
    }

    trace!("{} legal moves for {}", moves.len(), mover);
    moves
}

/// Simulates the move and checks the mover's king afterwards.
fn leaves_king_safe(state: &BoardState, candidate: &ChessMove) -> bool {
    match state.apply(candidate, ApplyMode::Bare) {
        Ok(next) => !in_check(&next, state.turn()),
        Err(_) => false,
    }
}

/// Can `color` land on `square`? Empty squares and enemy pieces qualify.
fn is_open_to(state: &BoardState, square: Square, color: Color) -> bool {
    match state.get(square) {
        Some((occupant, _)) => occupant != color,
        None => true,
    }
}

fn sliding_moves(
    state: &BoardState,
    piece: &Piece,
    directions: &[(i8, i8)],
    moves: &mut ChessMoveList,
) {
    for &(file_step, rank_step) in directions {
        let mut current = piece.square;
        while let Some(next) = current.offset(file_step, rank_step) {
            match state.get(next) {
                None => moves.push(ChessMove::new(piece.square, next, piece.kind)),
                Some((color, _)) => {
                    if color != piece.color {
                        moves.push(ChessMove::new(piece.square, next, piece.kind));
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

fn knight_moves(state: &BoardState, piece: &Piece, moves: &mut ChessMoveList) {
    for &(df, dr) in KNIGHT_OFFSETS.iter() {
        if let Some(to) = piece.square.offset(df, dr) {
            if is_open_to(state, to, piece.color) {
                moves.push(ChessMove::new(piece.square, to, PieceKind::Knight));
            }
        }
    }
}

fn king_moves(state: &BoardState, piece: &Piece, moves: &mut ChessMoveList) {
    for &(df, dr) in KING_STEPS.iter() {
        if let Some(to) = piece.square.offset(df, dr) {
            if is_open_to(state, to, piece.color) {
                moves.push(ChessMove::new(piece.square, to, PieceKind::King));
            }
        }
    }
    castle_moves(state, piece, moves);
}

struct CastleWing {
    rook_file: u8,
    /// Files that must be empty between king and rook.
    between: &'static [u8],
    /// Files the king passes over and lands on.
    crossed: &'static [u8],
    destination_file: u8,
}

const CASTLE_WINGS: [CastleWing; 2] = [
    CastleWing {
        rook_file: 8,
        between: &[6, 7],
        crossed: &[6, 7],
        destination_file: 7,
    },
    CastleWing {
        rook_file: 1,
        between: &[2, 3, 4],
        crossed: &[4, 3],
        destination_file: 3,
    },
];

/// Castling requires an unmoved king on its home square and an unmoved rook
/// in the corner, nothing between them, the king not in check, and no
/// attacked square on the king's path or destination.
fn castle_moves(state: &BoardState, king: &Piece, moves: &mut ChessMoveList) {
    let color = king.color;
    let rank = color.back_rank();
    if king.has_moved || king.square.file() != 5 || king.square.rank() != rank {
        return;
    }
    if in_check(state, color) {
        return;
    }

    for wing in CASTLE_WINGS.iter() {
        let rook_unmoved = Square::new(wing.rook_file, rank)
            .and_then(|square| state.piece_at(square))
            .map_or(false, |rook| {
                rook.kind == PieceKind::Rook && rook.color == color && !rook.has_moved
            });
        if !rook_unmoved {
            continue;
        }

        let path_clear = wing
            .between
            .iter()
            .filter_map(|&file| Square::new(file, rank))
            .all(|square| !state.is_occupied(square));
        if !path_clear {
            continue;
        }

        let path_safe = wing
            .crossed
            .iter()
            .filter_map(|&file| Square::new(file, rank))
            .all(|square| !attacked(state, square, color.opposite()));
        if !path_safe {
            continue;
        }

        if let Some(to) = Square::new(wing.destination_file, rank) {
            moves.push(ChessMove::castle(king.square, to));
        }
    }
}

fn pawn_moves(state: &BoardState, piece: &Piece, moves: &mut ChessMoveList) {
    let color = piece.color;
    let direction = color.direction();
    let from = piece.square;

    let push = |moves: &mut ChessMoveList, to: Square| {
        let chess_move = ChessMove::new(from, to, PieceKind::Pawn);
        if to.rank() == color.promotion_rank() {
            moves.push(chess_move.with_promotion(PieceKind::Queen));
        } else {
            moves.push(chess_move);
        }
    };

    if let Some(one) = from.offset(0, direction) {
        if !state.is_occupied(one) {
            push(moves, one);
            if from.rank() == color.pawn_rank() {
                if let Some(two) = one.offset(0, direction) {
                    if !state.is_occupied(two) {
                        push(moves, two);
                    }
                }
            }
        }
    }

    for &file_step in [-1i8, 1].iter() {
        if let Some(to) = from.offset(file_step, direction) {
            if let Some((occupant, _)) = state.get(to) {
                if occupant != color {
                    push(moves, to);
                }
            }
        }
    }

    if let Some(to) = en_passant_target(state, piece) {
        moves.push(ChessMove::en_passant(from, to));
    }
}

/// The square a pawn would move to when capturing en passant, if the
/// previous ply was an adjacent enemy pawn's double step.
fn en_passant_target(state: &BoardState, pawn: &Piece) -> Option<Square> {
    let color = pawn.color;
    if pawn.square.rank() != color.en_passant_rank() {
        return None;
    }
    let last = state.last_move()?;
    if last.kind() != PieceKind::Pawn {
        return None;
    }
    let rank_distance = (last.to().rank() as i8 - last.from().rank() as i8).abs();
    if rank_distance != 2 || last.to().rank() != pawn.square.rank() {
        return None;
    }
    if (last.to().file() as i8 - pawn.square.file() as i8).abs() != 1 {
        return None;
    }
    match state.get(last.to()) {
        Some((occupant, PieceKind::Pawn)) if occupant != color => {}
        _ => return None,
    }
    let to = last.to().offset(0, color.direction())?;
    if state.is_occupied(to) {
        return None;
    }
    Some(to)
}

/// Counts leaf positions `depth` plies below `state`.
pub fn count_positions(state: &BoardState, depth: u8) -> usize {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(state, false);
    if depth == 1 {
        return moves.len();
    }
    moves
        .iter()
        .filter_map(|chess_move| state.apply(chess_move, ApplyMode::Bare).ok())
        .map(|next| count_positions(&next, depth - 1))
        .sum()
}
