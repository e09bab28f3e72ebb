//! Chess move generation algorithms.

pub mod attacks;
pub mod generator;


pub use attacks::{attacked, in_check};
pub use generator::{count_positions, legal_moves, ChessMoveList};
