//! Subcommands of the `chess-ai` binary. Only `main.rs` uses this module.

pub mod args;
pub mod commands;

pub use args::Chess;
