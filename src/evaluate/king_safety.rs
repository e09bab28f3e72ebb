//! King safety.
//!
//! Each king collects penalty points for exposure. A king on the d or e file
//! is charged for sitting in the centre and for every nearby file without a
//! friendly pawn. A king on either flank is instead judged by its pawn shield
//! on the rook, knight and bishop files of that flank, by an enemy pawn poised
//! to break the shield, and by how far it has strayed from the corner.

use crate::board::color::Color;
use crate::board::piece::PieceKind;
use crate::board::BoardState;

use super::{pawn_file, PawnFile};

const SAFETY_MODIFIER: i32 = -25;

const IN_CENTER: i32 = 5;
const OPEN_FILE: i32 = 6;
const NOT_CORNER: i32 = 2;
const IN_CORNER: i32 = 3;
const PAWN_ATTACK_BARRIER: i32 = 10;

/// Penalties for one shield file: (pawn missing, file fully open,
/// advanced 1, advanced 2, advanced further).
struct ShieldPenalties {
    missing: i32,
    open: i32,
    advanced: [i32; 3],
}

const ROOK_PAWN: ShieldPenalties = ShieldPenalties {
    missing: 8,
    open: 10,
    advanced: [3, 6, 8],
};

const KNIGHT_PAWN: ShieldPenalties = ShieldPenalties {
    missing: 8,
    open: 10,
    advanced: [2, 5, 8],
};

const BISHOP_PAWN: ShieldPenalties = ShieldPenalties {
    missing: 2,
    open: 0,
    advanced: [1, 2, 2],
};

/// Scaled difference of the two kings' penalties, positive when the max
/// side's king is the safer one.
pub fn safety_swing(state: &BoardState) -> i32 {
    let max_side = state.max_side();
    SAFETY_MODIFIER * (king_penalty(state, max_side) - king_penalty(state, max_side.opposite()))
}

pub fn king_penalty(state: &BoardState, color: Color) -> i32 {
    let king = match state.king_square(color) {
        Some(square) => square,
        None => return 0,
    };
    let file = king.file();

    if file == 4 || file == 5 {
        let nearby: [u8; 3] = if file == 4 { [3, 4, 5] } else { [4, 5, 6] };
        let open = nearby
            .iter()
            .filter(|&&f| !pawn_file(state, f, color).has_own_pawn())
            .count() as i32;
        return IN_CENTER + open * OPEN_FILE;
    }

    let (rook_file, knight_file, bishop_file) = if file < 4 { (1, 2, 3) } else { (8, 7, 6) };

    let mut issues = 0;
    issues += shield_penalty(state, rook_file, color, &ROOK_PAWN);
    issues += shield_penalty(state, knight_file, color, &KNIGHT_PAWN);
    if issues > 1 {
        issues += shield_penalty(state, bishop_file, color, &BISHOP_PAWN);
    }

    let back_rank = color.back_rank();
    let barrier_rank = (back_rank as i8 + 2 * color.direction()) as u8;
    let barrier_broken = state
        .side(color.opposite())
        .of_kind(PieceKind::Pawn)
        .any(|pawn| pawn.square.file() == knight_file && pawn.square.rank() == barrier_rank);
    if barrier_broken {
        issues += PAWN_ATTACK_BARRIER;
    }

    if (3..=6).contains(&file) {
        issues += NOT_CORNER;
    }
    let rank_steps = (king.rank() as i8 - back_rank as i8).abs();
    issues += NOT_CORNER * rank_steps.min(3) as i32;
    if rank_steps == 0 && (file == 1 || file == 8) {
        issues += IN_CORNER;
    }

    issues
}

fn shield_penalty(state: &BoardState, file: u8, color: Color, penalties: &ShieldPenalties) -> i32 {
    let pawns = pawn_file(state, file, color);
    if !pawns.has_own_pawn() {
        let open = if pawns == PawnFile::Empty {
            penalties.open
        } else {
            0
        };
        return penalties.missing + open;
    }
    match pawn_progression(state, file, color) {
        0 => 0,
        1 => penalties.advanced[0],
        2 => penalties.advanced[1],
        _ => penalties.advanced[2],
    }
}

/// Ranks the first of `color`'s pawns on `file` has advanced from its
/// starting rank.
fn pawn_progression(state: &BoardState, file: u8, color: Color) -> u8 {
    state
        .side(color)
        .of_kind(PieceKind::Pawn)
        .find(|pawn| pawn.square.file() == file)
        .map_or(0, |pawn| {
            ((pawn.square.rank() as i8 - color.pawn_rank() as i8) * color.direction()).max(0) as u8
        })
}
