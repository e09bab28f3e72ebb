use common::Square;
use log::trace;

use super::error::BoardError;
use super::piece::PieceKind;
use super::BoardState;
use crate::chess_move::ChessMove;
use crate::evaluate::{self, piece_values, Strategy};

/// How much annotation the child produced by `BoardState::apply` carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyMode {
    /// Move the pieces only. Used for legality simulation and for committing
    /// moves to a game in progress.
    Bare,
    /// Also decide whether the child ends the game (no legal reply, or a
    /// repetition draw). A finished game carries its terminal utility.
    TerminalCheck,
    /// Also compute and cache the child's utility, its swing from
    /// `parent_utility`, and the terminal flag.
    Evaluate {
        strategy: Strategy,
        is_opening: bool,
        parent_utility: i32,
    },
}

impl ApplyMode {
    /// `Evaluate` with the parent's utility computed from `parent` itself.
    pub fn evaluate_from(parent: &BoardState, strategy: Strategy, is_opening: bool) -> Self {
        ApplyMode::Evaluate {
            strategy,
            is_opening,
            parent_utility: evaluate::utility(parent, is_opening, strategy),
        }
    }
}

impl BoardState {
    /// Plays `chess_move` for the side to move and returns the resulting
    /// position. `self` is left untouched.
    pub fn apply(&self, chess_move: &ChessMove, mode: ApplyMode) -> Result<BoardState, BoardError> {
        let mut next = self.clone();
        next.move_pieces(chess_move)?;
        next.push_recent_move(*chess_move);
        next.turn = self.turn.opposite();
        next.utility = 0;
        next.quiescent_change = 0;
        next.is_terminal = false;

        match mode {
            ApplyMode::Bare => {}
            ApplyMode::TerminalCheck => {
                if let Some(ending) = evaluate::game_ending(&next) {
                    next.is_terminal = true;
                    next.utility = evaluate::terminal_utility(&next, ending);
                }
            }
            ApplyMode::Evaluate {
                strategy,
                is_opening,
                parent_utility,
            } => {
                let ending = evaluate::game_ending(&next);
                next.is_terminal = ending.is_some();
                next.utility = match ending {
                    Some(ending) => evaluate::terminal_utility(&next, ending),
                    None => evaluate::static_utility(&next, is_opening, strategy),
                };
                next.quiescent_change = next.utility - parent_utility;
            }
        }

        Ok(next)
    }

    fn move_pieces(&mut self, chess_move: &ChessMove) -> Result<(), BoardError> {
        let mover = self.turn;
        let from = chess_move.from();
        let to = chess_move.to();

        let index = self.sides[mover.index()]
            .position_of(from)
            .ok_or(BoardError::FromSquareIsEmptyMoveApplicationError { square: from })?;

        if chess_move.is_en_passant() {
            // the captured pawn sits beside the capturing pawn, not on `to`
            let captured = Square::new(to.file(), from.rank())
                .ok_or(BoardError::EnPassantDidNotResultInCaptureError { square: to })?;
            if !self.capture(captured) {
                return Err(BoardError::EnPassantDidNotResultInCaptureError { square: captured });
            }
        } else if chess_move.is_castle() {
            self.move_castling_rook(from, to)?;
            self.castled[mover.index()] = true;
        } else if let Some((color, _)) = self.grid[to.index()] {
            if color != mover {
                self.capture(to);
            }
        }

        let piece = self.sides[mover.index()]
            .piece_mut(index)
            .ok_or(BoardError::FromSquareIsEmptyMoveApplicationError { square: from })?;
        piece.has_moved = true;
        piece.square = to;
        if let Some(promotion) = chess_move.promotion() {
            piece.kind = promotion;
        }
        let kind = piece.kind;

        if let Some(promotion) = chess_move.promotion() {
            let gain = piece_values::material_value(promotion)
                - piece_values::material_value(PieceKind::Pawn);
            self.adjust_material(gain);
        }

        self.grid[from.index()] = None;
        self.grid[to.index()] = Some((mover, kind));
        trace!("applied {} for {}", chess_move, mover);
        Ok(())
    }

    fn move_castling_rook(&mut self, king_from: Square, king_to: Square) -> Result<(), BoardError> {
        if king_from.rank() != king_to.rank()
            || (king_to.file() as i8 - king_from.file() as i8).abs() != 2
        {
            return Err(BoardError::InvalidCastleMoveError);
        }
        let rank = king_from.rank();
        let (rook_file, rook_target_file) = if king_to.file() > king_from.file() {
            (8, king_to.file() - 1)
        } else {
            (1, king_to.file() + 1)
        };
        let rook_from = Square::new(rook_file, rank).ok_or(BoardError::InvalidCastleMoveError)?;
        let rook_to =
            Square::new(rook_target_file, rank).ok_or(BoardError::InvalidCastleMoveError)?;

        let mover = self.turn;
        let side = &mut self.sides[mover.index()];
        let rook = side
            .position_of(rook_from)
            .and_then(|index| side.piece_mut(index))
            .filter(|piece| piece.kind == PieceKind::Rook)
            .ok_or(BoardError::CastleNonRookError { square: rook_from })?;
        rook.square = rook_to;
        rook.has_moved = true;

        self.grid[rook_from.index()] = None;
        self.grid[rook_to.index()] = Some((mover, PieceKind::Rook));
        Ok(())
    }

    /// Removes the opponent's piece on `square`. Returns false if there was none.
    fn capture(&mut self, square: Square) -> bool {
        let defender = self.turn.opposite();
        match self.sides[defender.index()].remove_at(square) {
            Some(captured) => {
                self.grid[square.index()] = None;
                self.adjust_material(piece_values::material_value(captured.kind));
                true
            }
            None => false,
        }
    }

    /// Applies a material gain for the side to move to the max-side differential.
    fn adjust_material(&mut self, gain: i32) {
        if self.turn == self.max_side {
            self.material_difference += gain;
        } else {
            self.material_difference -= gain;
        }
    }
}
