//! Chess-specific trait implementations for the alpha-beta search.

use crate::alpha_beta_searcher::{
    alpha_beta_search, Evaluator, Expansion, GameState, MoveCollection, MoveGenerator,
    SearchContext, SearchError, TimeBudget,
};
use crate::board::{error::BoardError, ApplyMode, BoardState};
use crate::chess_move::ChessMove;
use crate::evaluate::{self, Strategy};
use crate::move_generator::{legal_moves, ChessMoveList};

use super::history_table::HistoryTable;

impl GameState for BoardState {
    #[inline]
    fn is_terminal(&self) -> bool {
        BoardState::is_terminal(self)
    }

    #[inline]
    fn utility(&self) -> i32 {
        BoardState::utility(self)
    }

    #[inline]
    fn utility_swing(&self) -> i32 {
        self.quiescent_change()
    }
}

impl MoveCollection<ChessMove> for ChessMoveList {}

/// Expands positions for one search. The strategy and opening flag decide how
/// frontier children are scored.
#[derive(Clone, Copy, Debug)]
pub struct ChessMoveGenerator {
    strategy: Strategy,
    is_opening: bool,
}

impl ChessMoveGenerator {
    pub fn new(strategy: Strategy, is_opening: bool) -> Self {
        Self {
            strategy,
            is_opening,
        }
    }
}

impl MoveGenerator<BoardState> for ChessMoveGenerator {
    type Move = ChessMove;
    type MoveList = ChessMoveList;
    type Error = BoardError;

    #[inline]
    fn generate_moves(&self, state: &BoardState) -> ChessMoveList {
        legal_moves(state, false)
    }

    fn successor(
        &self,
        state: &BoardState,
        chess_move: &ChessMove,
        expansion: Expansion,
    ) -> Result<BoardState, BoardError> {
        let mode = match expansion {
            Expansion::Interior => ApplyMode::TerminalCheck,
            Expansion::Frontier { parent_utility } => ApplyMode::Evaluate {
                strategy: self.strategy,
                is_opening: self.is_opening,
                parent_utility,
            },
        };
        state.apply(chess_move, mode)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ChessEvaluator {
    strategy: Strategy,
    is_opening: bool,
}

impl ChessEvaluator {
    pub fn new(strategy: Strategy, is_opening: bool) -> Self {
        Self {
            strategy,
            is_opening,
        }
    }
}

impl Evaluator<BoardState> for ChessEvaluator {
    #[inline]
    fn evaluate(&self, state: &BoardState) -> i32 {
        evaluate::utility(state, self.is_opening, self.strategy)
    }
}

/// Searches for the best chess move from `state` for the side to move.
///
/// `state` should already be re-rooted with `BoardState::with_max_side` for
/// the searching player.
#[must_use = "search returns the best move found"]
pub fn search_best_move(
    context: &mut SearchContext,
    state: &BoardState,
    strategy: Strategy,
    is_opening: bool,
    history: &mut HistoryTable,
    budget: &TimeBudget,
) -> Result<ChessMove, SearchError> {
    let move_generator = ChessMoveGenerator::new(strategy, is_opening);
    let evaluator = ChessEvaluator::new(strategy, is_opening);
    alpha_beta_search(context, state, &move_generator, &evaluator, history, budget)
}
