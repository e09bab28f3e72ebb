use std::time::{Duration, Instant};

use log::{debug, info};

use crate::board::color::Color;
use crate::game::display::GameDisplay;
use crate::game::game::{EngineError, Game, GameConfig, GameOutcome};
use crate::game::input_source::InputSource;

pub struct GameLoop {
    game: Game,
    ui: GameDisplay,
    white: Box<dyn InputSource>,
    black: Box<dyn InputSource>,
    frame_delay: Option<Duration>,
}

impl GameLoop {
    pub fn new(
        white: Box<dyn InputSource>,
        black: Box<dyn InputSource>,
        config: GameConfig,
    ) -> Self {
        Self::with_game(Game::new(config), white, black)
    }

    pub fn with_game(game: Game, white: Box<dyn InputSource>, black: Box<dyn InputSource>) -> Self {
        Self {
            game,
            ui: GameDisplay::new(),
            white,
            black,
            frame_delay: None,
        }
    }

    /// Pause after each computer move so a watcher can follow the game.
    pub fn with_frame_delay(mut self, delay: Option<Duration>) -> Self {
        self.frame_delay = delay;
        self
    }

    pub fn with_display(mut self, ui: GameDisplay) -> Self {
        self.ui = ui;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Plays until the game ends. The mover's clock runs while its source is
    /// thinking, including time spent on rejected moves.
    pub fn run(&mut self) -> Result<GameOutcome, EngineError> {
        loop {
            if let Some(outcome) = self.game.outcome() {
                self.ui.render_game_state(&self.game);
                println!("Game Over.");
                println!("{}", outcome);
                info!("game over after {} plies: {}", self.game.turn(), outcome);
                return Ok(outcome);
            }

            self.ui.render_game_state(&self.game);

            let color = self.game.current_player();
            let source = match color {
                Color::White => &mut self.white,
                Color::Black => &mut self.black,
            };
            let started = Instant::now();
            let chosen = source.next_move(&self.game);
            self.game.charge_time(color, started.elapsed());

            let chess_move = match chosen {
                Ok(chess_move) => chess_move,
                Err(EngineError::InvalidMove { chess_move }) => {
                    println!("not a legal move: {}", chess_move);
                    continue;
                }
                Err(error) => return Err(error),
            };

            match self.game.update(&chess_move) {
                Ok(played) => {
                    debug!("{} played {}", color.name(), played);
                    if !source.is_human() {
                        if let Some(delay) = self.frame_delay {
                            std::thread::sleep(delay);
                        }
                    }
                }
                Err(EngineError::InvalidMove { chess_move }) => {
                    println!("not a legal move: {}", chess_move)
                }
                Err(error) => return Err(error),
            }
        }
    }
}
