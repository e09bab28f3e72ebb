//! Game-phase terms: development in the opening, king hunting in the endgame.

use crate::board::color::Color;
use crate::board::piece::PieceKind;
use crate::board::BoardState;

const NUDGE: i32 = -10;
const UNMOVED_PENALTY: i32 = -100;
const QUEEN_IS_EARLY: i32 = -50;
const CANT_CASTLE: i32 = -300;
const NOT_YET_CASTLED: i32 = -150;
const CASTLED: i32 = 2000;

const CORNER_CHASE_WEIGHT: i32 = -10;

pub fn opening_term(state: &BoardState) -> i32 {
    let max_side = state.max_side();
    side_development(state, max_side, true) - side_development(state, max_side.opposite(), false)
}

/// Penalises undeveloped minor pieces and centre pawns, an early queen, and
/// lost castling chances. `nudge` adds a small extra push to develop the
/// king-side pieces first.
fn side_development(state: &BoardState, color: Color, nudge: bool) -> i32 {
    let side = state.side(color);
    let mut utility = 0;
    let mut all_developed = true;

    for piece in side.pieces() {
        let needs_development = match piece.kind {
            PieceKind::Bishop | PieceKind::Knight => true,
            PieceKind::Pawn => piece.square.file() == 4 || piece.square.file() == 5,
            _ => false,
        };
        if needs_development && !piece.has_moved {
            if nudge && piece.square.file() > 4 {
                utility += NUDGE;
            }
            utility += UNMOVED_PENALTY;
            all_developed = false;
        }
    }

    let queen_moved = side
        .of_kind(PieceKind::Queen)
        .next()
        .map_or(false, |queen| queen.has_moved);
    if queen_moved && !all_developed {
        utility += QUEEN_IS_EARLY;
    }

    if state.has_castled(color) {
        utility += CASTLED;
    } else {
        utility += NOT_YET_CASTLED;
        let moved_rooks = side
            .of_kind(PieceKind::Rook)
            .filter(|rook| rook.has_moved)
            .count() as i32;
        utility += CANT_CASTLE * moved_rooks;
        if side.king().map_or(false, |king| king.has_moved) {
            utility += CANT_CASTLE;
        }
    }

    utility
}

/// Rewards driving the opponent's king toward a corner.
pub fn endgame_term(state: &BoardState) -> i32 {
    let king = match state.king_square(state.max_side().opposite()) {
        Some(square) => square,
        None => return 0,
    };
    let corners = [(1, 1), (1, 8), (8, 1), (8, 8)];
    let distance = corners
        .iter()
        .map(|&(file, rank): &(i32, i32)| {
            (king.file() as i32 - file).abs() + (king.rank() as i32 - rank).abs()
        })
        .min()
        .unwrap_or(0);
    distance * CORNER_CHASE_WEIGHT
}
