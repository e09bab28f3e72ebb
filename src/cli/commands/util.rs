//! Shared utilities for CLI commands.

use std::path::PathBuf;
use std::time::Duration;

use chess_ai::alpha_beta_searcher::SearchConfig;
use chess_ai::board::color::Color;
use chess_ai::chess_search::{AiConfig, AiSession};
use chess_ai::evaluate::Strategy;
use chess_ai::game::input_source::{EngineInput, HumanInput, InputSource};
use chess_ai::game::r#loop::GameLoop;
use chess_ai::game::{EngineError, GameConfig};
use chess_ai::input_handler::InputError;

pub(crate) fn run_game_loop(
    white: Box<dyn InputSource>,
    black: Box<dyn InputSource>,
    config: GameConfig,
    frame_delay: Option<Duration>,
) {
    let mut game = GameLoop::new(white, black, config).with_frame_delay(frame_delay);
    match game.run() {
        Ok(_) => {}
        Err(EngineError::InputError {
            error: InputError::UserExit,
        }) => println!("Exiting."),
        Err(error) => {
            eprintln!("error: {}", error);
            std::process::exit(1);
        }
    }
}

pub(crate) fn create_config(time_seconds: u64) -> GameConfig {
    GameConfig {
        time_allowed: Duration::from_secs(time_seconds),
    }
}

pub(crate) fn create_human() -> Box<dyn InputSource> {
    Box::new(HumanInput::stdin())
}

/// A computer player for `color`. Each color keeps its own history file.
pub(crate) fn create_engine(
    color: Color,
    strategy: Strategy,
    history_dir: Option<PathBuf>,
    max_depth: u8,
) -> Box<dyn InputSource> {
    let session_id = match color {
        Color::White => "0",
        Color::Black => "1",
    };
    let session = AiSession::new(AiConfig {
        strategy,
        session_id: session_id.to_string(),
        history_dir,
        search: SearchConfig {
            max_depth,
            ..SearchConfig::default()
        },
    });
    Box::new(EngineInput::new(session))
}
