pub mod display;
pub mod game;
pub mod input_source;
pub mod r#loop; // `loop` is reserved keyword, need to escape with `r#`

pub use game::{EngineError, Game, GameConfig, GameOutcome};
