//! Chess-specific implementation of the alpha-beta search traits, plus the
//! history heuristic and the per-player AI session built on them.

pub mod ai;
pub mod history_store;
pub mod history_table;
pub mod implementation;


pub use ai::{AiConfig, AiSession};
pub use history_store::{HistoryStore, HistoryStoreError};
pub use history_table::HistoryTable;
pub use implementation::{search_best_move, ChessEvaluator, ChessMoveGenerator};
