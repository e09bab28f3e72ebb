use crate::board::piece::PieceKind;
use crate::board::side::Side;

pub const QUEEN_VALUE: i32 = 9000;
pub const ROOK_VALUE: i32 = 5000;
pub const BISHOP_VALUE: i32 = 3200;
pub const KNIGHT_VALUE: i32 = 3200;
pub const PAWN_VALUE: i32 = 1000;

/// Kings are never captured, so they carry no material.
pub fn material_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => 0,
    }
}

pub fn side_material(side: &Side) -> i32 {
    side.pieces()
        .iter()
        .map(|piece| material_value(piece.kind))
        .sum()
}
