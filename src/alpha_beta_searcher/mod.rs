//! Generic iterative-deepening alpha-beta search.
//!
//! The driver knows nothing about chess: it works over any `GameState` given
//! a `MoveGenerator`, an `Evaluator` and a `MoveHistory` for ordering.

mod search;
mod traits;

#[cfg(test)]
mod tests;

pub use search::{
    alpha_beta_search, SearchConfig, SearchContext, SearchError, TimeBudget, SCORE_BOUND,
};
pub use traits::{
    Evaluator, Expansion, GameState, MoveCollection, MoveGenerator, MoveHistory,
};
