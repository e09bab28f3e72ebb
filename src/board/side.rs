use common::Square;

use super::color::Color;
use super::piece::{Piece, PieceKind};

/// One player's pieces. The opposing side is reached through the owning
/// `BoardState` with `color.opposite()`.
#[derive(Clone, Debug)]
pub struct Side {
    color: Color,
    pieces: Vec<Piece>,
}

impl Side {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            pieces: Vec::with_capacity(16),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn direction(&self) -> i8 {
        self.color.direction()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.square == square)
    }

    pub fn king(&self) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|piece| piece.kind == PieceKind::King)
    }

    pub fn has(&self, kind: PieceKind) -> bool {
        self.pieces.iter().any(|piece| piece.kind == kind)
    }

    pub fn of_kind(&self, kind: PieceKind) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |piece| piece.kind == kind)
    }

    pub(crate) fn position_of(&self, square: Square) -> Option<usize> {
        self.pieces.iter().position(|piece| piece.square == square)
    }

    pub(crate) fn piece_mut(&mut self, index: usize) -> Option<&mut Piece> {
        self.pieces.get_mut(index)
    }

    pub(crate) fn push(&mut self, piece: Piece) {
        self.pieces.push(piece);
    }

    pub(crate) fn remove_at(&mut self, square: Square) -> Option<Piece> {
        let index = self.position_of(square)?;
        Some(self.pieces.remove(index))
    }
}
