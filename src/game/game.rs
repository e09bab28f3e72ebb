//! One game between two players: the position, the move log, both clocks and
//! the ply counter.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::alpha_beta_searcher::SearchError;
use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::{ApplyMode, BoardState};
use crate::chess_move::ChessMove;
use crate::input_handler::InputError;
use crate::move_generator::{in_check, legal_moves};

/// Clock each player starts with.
pub const DEFAULT_TIME_ALLOWED: Duration = Duration::from_secs(900);

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("the move is not legal in this position: {chess_move}")]
    InvalidMove { chess_move: String },
    #[error("board error: {error}")]
    BoardError {
        #[from]
        error: BoardError,
    },
    #[error("search error: {error}")]
    SearchError {
        #[from]
        error: SearchError,
    },
    #[error("input error: {error}")]
    InputError {
        #[from]
        error: InputError,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    pub time_allowed: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_allowed: DEFAULT_TIME_ALLOWED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Repetition,
    Checkmate { winner: Color },
    Stalemate,
    Timeout { loser: Color },
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Repetition => write!(f, "Draw because of repeated move sequence."),
            GameOutcome::Checkmate { winner } => {
                write!(f, "{} Player Wins by Checkmate.", winner.name())
            }
            GameOutcome::Stalemate => write!(f, "Stalemate. No moves possible outside of check."),
            GameOutcome::Timeout { loser } => write!(
                f,
                "{} wins because {} time is exhausted.",
                loser.opposite().name(),
                loser.name()
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    state: BoardState,
    move_log: Vec<ChessMove>,
    remaining: [Duration; 2],
    turn: u32,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_position(BoardState::starting_position(), config)
    }

    pub fn with_position(state: BoardState, config: GameConfig) -> Self {
        Self {
            state,
            move_log: Vec::new(),
            remaining: [config.time_allowed; 2],
            turn: 0,
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn current_player(&self) -> Color {
        self.state.turn()
    }

    /// Plies played so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn move_log(&self) -> &[ChessMove] {
        &self.move_log
    }

    pub fn last_move(&self) -> Option<&ChessMove> {
        self.move_log.last()
    }

    pub fn time_remaining(&self, color: Color) -> Duration {
        self.remaining[color.index()]
    }

    /// Takes `elapsed` off `color`'s clock, stopping at zero.
    pub fn charge_time(&mut self, color: Color, elapsed: Duration) {
        let clock = &mut self.remaining[color.index()];
        *clock = clock.saturating_sub(elapsed);
    }

    /// Whether a legal move with the same piece, origin and destination exists.
    pub fn valid_move(&self, chess_move: &ChessMove) -> bool {
        self.find_legal_move(chess_move).is_some()
    }

    /// The legal move matching `chess_move`'s key, carrying the castle and en
    /// passant flags from the generator and the promotion choice from
    /// `chess_move` when it names one.
    pub fn find_legal_move(&self, chess_move: &ChessMove) -> Option<ChessMove> {
        legal_moves(&self.state, false)
            .into_iter()
            .find(|legal| legal.key() == chess_move.key())
            .map(|legal| match (legal.promotion(), chess_move.promotion()) {
                (Some(_), Some(choice)) => legal.with_promotion(choice),
                _ => legal,
            })
    }

    /// Plays `chess_move` for the side to move and logs it.
    pub fn update(&mut self, chess_move: &ChessMove) -> Result<ChessMove, EngineError> {
        let chess_move =
            self.find_legal_move(chess_move)
                .ok_or_else(|| EngineError::InvalidMove {
                    chess_move: chess_move.to_string(),
                })?;
        self.state = self.state.apply(&chess_move, ApplyMode::Bare)?;
        self.move_log.push(chess_move);
        self.turn += 1;
        Ok(chess_move)
    }

    /// Checks, in order: a repeated move sequence, the clocks (only while the
    /// side to move has a move), then checkmate or stalemate.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.state.is_draw() {
            return Some(GameOutcome::Repetition);
        }

        let to_move = self.state.turn();
        if !legal_moves(&self.state, true).is_empty() {
            return [Color::White, Color::Black]
                .iter()
                .find(|&&color| self.time_remaining(color) == Duration::from_secs(0))
                .map(|&loser| GameOutcome::Timeout { loser });
        }

        if in_check(&self.state, to_move) {
            Some(GameOutcome::Checkmate {
                winner: to_move.opposite(),
            })
        } else {
            Some(GameOutcome::Stalemate)
        }
    }
}
