//! Attack and check detection by casting rays out from the target square.

use common::Square;

use crate::board::color::Color;
use crate::board::piece::PieceKind;
use crate::board::BoardState;

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Returns the first occupied square along a ray from `origin` (exclusive),
/// with its distance in steps.
fn first_occupant(
    state: &BoardState,
    origin: Square,
    (file_step, rank_step): (i8, i8),
) -> Option<(Square, u8, Color, PieceKind)> {
    let mut current = origin;
    let mut distance = 0;
    while let Some(next) = current.offset(file_step, rank_step) {
        distance += 1;
        if let Some((color, kind)) = state.get(next) {
            return Some((next, distance, color, kind));
        }
        current = next;
    }
    None
}

/// Is `square` attacked by any piece belonging to `by`?
pub fn attacked(state: &BoardState, square: Square, by: Color) -> bool {
    for &direction in DIAGONALS.iter() {
        if let Some((_, distance, color, kind)) = first_occupant(state, square, direction) {
            if color != by {
                continue;
            }
            let hit = match kind {
                PieceKind::Queen | PieceKind::Bishop => true,
                PieceKind::King => distance == 1,
                // a pawn attacks diagonally forward, so it must sit one rank
                // behind the target from its own point of view
                PieceKind::Pawn => distance == 1 && direction.1 == -by.direction(),
                _ => false,
            };
            if hit {
                return true;
            }
        }
    }

    for &direction in ORTHOGONALS.iter() {
        if let Some((_, distance, color, kind)) = first_occupant(state, square, direction) {
            if color != by {
                continue;
            }
            let hit = match kind {
                PieceKind::Queen | PieceKind::Rook => true,
                PieceKind::King => distance == 1,
                _ => false,
            };
            if hit {
                return true;
            }
        }
    }

    KNIGHT_OFFSETS.iter().any(|&(df, dr)| {
        square
            .offset(df, dr)
            .and_then(|from| state.get(from))
            .map_or(false, |(color, kind)| color == by && kind == PieceKind::Knight)
    })
}

/// Is `color`'s king attacked by the opponent? A side without a king is
/// never in check.
pub fn in_check(state: &BoardState, color: Color) -> bool {
    match state.king_square(color) {
        Some(king) => attacked(state, king, color.opposite()),
        None => false,
    }
}
