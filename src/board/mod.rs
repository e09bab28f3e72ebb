pub mod color;
pub mod error;
pub mod piece;
pub mod side;

mod apply;
mod display;

#[cfg(test)]
mod tests;

use std::collections::VecDeque;

pub use apply::ApplyMode;
pub use common::Square;

use color::Color;
use error::BoardError;
use piece::{Piece, PieceKind};
use side::Side;

use crate::chess_move::ChessMove;
use crate::evaluate::piece_values;

/// Number of plies kept for repetition detection.
pub const RECENT_MOVE_WINDOW: usize = 8;

/// A position plus the cached search annotations for it.
///
/// States are never mutated once handed to the search: `apply` clones the
/// parent and returns an independently owned child, so sibling branches never
/// observe each other's speculative moves. The occupancy grid mirrors the two
/// piece collections and exists only to make square lookups cheap.
#[derive(Clone, Debug)]
pub struct BoardState {
    turn: Color,
    max_side: Color,
    sides: [Side; 2],
    grid: [Option<(Color, PieceKind)>; 64],
    recent_moves: VecDeque<ChessMove>,
    material_difference: i32,
    utility: i32,
    quiescent_change: i32,
    is_terminal: bool,
    castled: [bool; 2],
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            turn: Color::White,
            max_side: Color::White,
            sides: [Side::new(Color::Black), Side::new(Color::White)],
            grid: [None; 64],
            recent_moves: VecDeque::with_capacity(RECENT_MOVE_WINDOW),
            material_difference: 0,
            utility: 0,
            quiescent_change: 0,
            is_terminal: false,
            castled: [false; 2],
        }
    }
}

impl BoardState {
    /// An empty board with white to move.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn starting_position() -> Self {
        let mut board = Self::new();
        for &color in [Color::White, Color::Black].iter() {
            let back = color.back_rank();
            let pawns = color.pawn_rank();
            let mut layout: Vec<(PieceKind, u8, u8)> = (1..=8)
                .map(|file| (PieceKind::Pawn, file, pawns))
                .collect();
            layout.extend_from_slice(&[
                (PieceKind::Rook, 1, back),
                (PieceKind::Rook, 8, back),
                (PieceKind::Knight, 2, back),
                (PieceKind::Knight, 7, back),
                (PieceKind::Bishop, 3, back),
                (PieceKind::Bishop, 6, back),
                (PieceKind::Queen, 4, back),
                (PieceKind::King, 5, back),
            ]);
            for (kind, file, rank) in layout {
                if let Some(square) = Square::new(file, rank) {
                    board.place(Piece::new(kind, square, color));
                }
            }
        }
        board
    }

    pub fn put(&mut self, square: Square, kind: PieceKind, color: Color) -> Result<(), BoardError> {
        if self.grid[square.index()].is_some() {
            return Err(BoardError::SquareOccupiedBoardPutError { square });
        }
        self.place(Piece::new(kind, square, color));
        self.recompute_material_difference();
        Ok(())
    }

    fn place(&mut self, piece: Piece) {
        self.grid[piece.square.index()] = Some((piece.color, piece.kind));
        self.sides[piece.color.index()].push(piece);
    }

    /// Flags the piece on `square` as having moved, which rules it out of
    /// castling and the opening development terms.
    pub fn mark_moved(&mut self, square: Square) {
        if let Some((color, _)) = self.grid[square.index()] {
            let side = &mut self.sides[color.index()];
            if let Some(index) = side.position_of(square) {
                if let Some(piece) = side.piece_mut(index) {
                    piece.has_moved = true;
                }
            }
        }
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<(Color, PieceKind)> {
        self.grid[square.index()]
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.grid[square.index()].is_some()
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        let (color, _) = self.get(square)?;
        self.side(color).piece_at(square)
    }

    #[inline]
    pub fn side(&self, color: Color) -> &Side {
        &self.sides[color.index()]
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.side(color).king().map(|king| king.square)
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn set_turn(&mut self, color: Color) {
        self.turn = color;
    }

    #[inline]
    pub fn max_side(&self) -> Color {
        self.max_side
    }

    /// Re-roots the state for a search on behalf of `color`, recomputing the
    /// material differential from that side's point of view.
    pub fn with_max_side(mut self, color: Color) -> Self {
        self.max_side = color;
        self.recompute_material_difference();
        self
    }

    pub fn recompute_material_difference(&mut self) {
        let own = piece_values::side_material(self.side(self.max_side));
        let opponent = piece_values::side_material(self.side(self.max_side.opposite()));
        self.material_difference = own - opponent;
    }

    #[inline]
    pub fn material_difference(&self) -> i32 {
        self.material_difference
    }

    /// Utility cached when this state was produced with `ApplyMode::Evaluate`.
    #[inline]
    pub fn utility(&self) -> i32 {
        self.utility
    }

    pub fn set_utility(&mut self, utility: i32) {
        self.utility = utility;
    }

    /// Utility swing relative to the parent position.
    #[inline]
    pub fn quiescent_change(&self) -> i32 {
        self.quiescent_change
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    pub fn has_castled(&self, color: Color) -> bool {
        self.castled[color.index()]
    }

    pub fn set_castled(&mut self, color: Color, castled: bool) {
        self.castled[color.index()] = castled;
    }

    pub fn recent_moves(&self) -> &VecDeque<ChessMove> {
        &self.recent_moves
    }

    pub fn last_move(&self) -> Option<&ChessMove> {
        self.recent_moves.back()
    }

    /// True when the last eight plies are the same four plies played twice.
    pub fn is_draw(&self) -> bool {
        if self.recent_moves.len() < RECENT_MOVE_WINDOW {
            return false;
        }
        let half = RECENT_MOVE_WINDOW / 2;
        (0..half).all(|i| self.recent_moves[i] == self.recent_moves[i + half])
    }

    fn push_recent_move(&mut self, chess_move: ChessMove) {
        if self.recent_moves.len() >= RECENT_MOVE_WINDOW {
            self.recent_moves.pop_front();
        }
        self.recent_moves.push_back(chess_move);
    }
}
