//! Rook activity: open files, the opponent's second rank, and connected rooks.

use common::Square;

use crate::board::color::Color;
use crate::board::piece::PieceKind;
use crate::board::BoardState;

use super::{pawn_file, PawnFile};

const ROOK_ON_SEVENTH: i32 = 200;
const ROOK_CONNECTED_ON_SEVENTH: i32 = 100;
const ROOK_OPEN_FILE: i32 = 100;
const ROOK_CONNECTED_OPEN_FILE: i32 = 50;
const ROOK_HALF_OPEN_FILE: i32 = 50;

pub fn rook_activity(state: &BoardState) -> i32 {
    let max_side = state.max_side();
    side_activity(state, max_side) - side_activity(state, max_side.opposite())
}

fn side_activity(state: &BoardState, color: Color) -> i32 {
    let rooks: Vec<Square> = state
        .side(color)
        .of_kind(PieceKind::Rook)
        .map(|rook| rook.square)
        .collect();
    let are_connected = rooks.len() == 2 && connected(state, rooks[0], rooks[1]);
    // the opponent's pawn rank
    let target_rank = color.opposite().pawn_rank();

    let mut activity = 0;
    for rook in rooks.iter() {
        match pawn_file(state, rook.file(), color) {
            PawnFile::Empty => {
                activity += ROOK_OPEN_FILE;
                if are_connected {
                    activity += ROOK_CONNECTED_OPEN_FILE;
                }
            }
            PawnFile::OpponentOnly | PawnFile::OwnOnly => activity += ROOK_HALF_OPEN_FILE,
            PawnFile::Shared => {}
        }

        if rook.rank() == target_rank {
            activity += ROOK_ON_SEVENTH;
            if are_connected {
                activity += ROOK_CONNECTED_ON_SEVENTH;
            }
        }
    }
    activity
}

/// Two rooks on a shared rank or file with nothing between them.
fn connected(state: &BoardState, a: Square, b: Square) -> bool {
    let (file_step, rank_step) = if a.rank() == b.rank() {
        ((b.file() as i8 - a.file() as i8).signum(), 0)
    } else if a.file() == b.file() {
        (0, (b.rank() as i8 - a.rank() as i8).signum())
    } else {
        return false;
    };

    let mut current = a;
    while let Some(next) = current.offset(file_step, rank_step) {
        if next == b {
            return true;
        }
        if state.is_occupied(next) {
            return false;
        }
        current = next;
    }
    false
}
