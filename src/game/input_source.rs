use std::io::{self, BufRead, StdinLock};

use crate::chess_move::ChessMove;
use crate::chess_search::AiSession;
use crate::input_handler::{parse_move_input, prompt_promotion, InputError, MoveInput};

use super::game::{EngineError, Game};

/// Where a player's moves come from.
pub trait InputSource {
    /// Returns a legal move for the side to move in `game`.
    fn next_move(&mut self, game: &Game) -> Result<ChessMove, EngineError>;

    /// Whether the game display should wait for this source between frames.
    fn is_human(&self) -> bool {
        false
    }
}

/// Reads coordinate moves (`e2e4`) from a terminal or any other reader.
pub struct HumanInput<R: BufRead> {
    reader: R,
}

impl HumanInput<StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> HumanInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Matches typed coordinates against the legal moves, asking for the
    /// promotion piece when the input left it out.
    fn resolve(&mut self, game: &Game, input: MoveInput) -> Result<ChessMove, EngineError> {
        let invalid = || EngineError::InvalidMove {
            chess_move: format!("{}{}", input.from, input.to),
        };
        let kind = match game.state().get(input.from) {
            Some((color, kind)) if color == game.current_player() => kind,
            _ => return Err(invalid()),
        };

        let requested = ChessMove::new(input.from, input.to, kind);
        let legal = game.find_legal_move(&requested).ok_or_else(invalid)?;
        if legal.promotion().is_none() {
            return Ok(legal);
        }
        let promotion = match input.promotion {
            Some(promotion) => promotion,
            None => prompt_promotion(&mut self.reader)?,
        };
        Ok(legal.with_promotion(promotion))
    }
}

impl<R: BufRead> InputSource for HumanInput<R> {
    /// Prompts until the player enters a legal move or asks to exit.
    fn next_move(&mut self, game: &Game) -> Result<ChessMove, EngineError> {
        loop {
            println!(
                "Enter a move for {} (e.g. e2e4, or e7e8q to promote):",
                game.current_player().name()
            );
            let attempt = parse_move_input(&mut self.reader)
                .map_err(EngineError::from)
                .and_then(|input| self.resolve(game, input));
            match attempt {
                Ok(chess_move) => return Ok(chess_move),
                Err(EngineError::InputError {
                    error: InputError::InvalidInput { input },
                }) => println!("invalid input: {}", input),
                Err(EngineError::InvalidMove { chess_move }) => {
                    println!("not a legal move: {}", chess_move)
                }
                Err(error) => return Err(error),
            }
        }
    }

    fn is_human(&self) -> bool {
        true
    }
}

/// The computer player.
pub struct EngineInput {
    session: AiSession,
}

impl EngineInput {
    pub fn new(session: AiSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &AiSession {
        &self.session
    }
}

impl InputSource for EngineInput {
    fn next_move(&mut self, game: &Game) -> Result<ChessMove, EngineError> {
        let color = game.current_player();
        let chess_move =
            self.session
                .run_turn(game.state(), game.time_remaining(color), game.turn())?;
        Ok(chess_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alpha_beta_searcher::SearchConfig;
    use crate::board::color::Color;
    use crate::board::piece::PieceKind;
    use crate::chess_position;
    use crate::chess_search::AiConfig;
    use crate::evaluate::Strategy;
    use crate::game::game::GameConfig;
    use crate::std_move;
    use common::square::*;
    use std::io::Cursor;

    fn promotion_game() -> Game {
        let board = chess_position! {
            ....k...
            P.......
            ........
            ........
            ........
            ........
            ........
            ....K...
        };
        Game::with_position(board, GameConfig::default())
    }

    #[test]
    fn test_human_input_reprompts_until_legal() {
        let game = Game::new(GameConfig::default());
        let mut human = HumanInput::new(Cursor::new("hello\ne2e5\ne7e5\ne2e4\n"));
        assert_eq!(human.next_move(&game).unwrap(), std_move!(E2, E4, Pawn));
    }

    #[test]
    fn test_human_input_exit() {
        let game = Game::new(GameConfig::default());
        let mut human = HumanInput::new(Cursor::new("e2\nquit\n"));
        assert!(matches!(
            human.next_move(&game),
            Err(EngineError::InputError {
                error: InputError::UserExit
            })
        ));
    }

    #[test]
    fn test_human_input_promotion() {
        let game = promotion_game();
        let mut human = HumanInput::new(Cursor::new("a7a8\ndragon\nknight\n"));
        let chess_move = human.next_move(&game).unwrap();
        assert_eq!(chess_move.promotion(), Some(PieceKind::Knight));

        let mut human = HumanInput::new(Cursor::new("a7a8r\n"));
        let chess_move = human.next_move(&game).unwrap();
        assert_eq!(chess_move.promotion(), Some(PieceKind::Rook));
    }

    #[test]
    fn test_engine_input_plays_a_legal_move() {
        let game = Game::new(GameConfig::default());
        let mut engine = EngineInput::new(AiSession::new(AiConfig {
            strategy: Strategy::MaterialOnly,
            search: SearchConfig {
                max_depth: 2,
                ..SearchConfig::default()
            },
            ..AiConfig::default()
        }));
        let chess_move = engine.next_move(&game).unwrap();
        assert!(game.valid_move(&chess_move));
        assert_eq!(game.state().get(chess_move.from()).map(|p| p.0), Some(Color::White));
        assert!(!engine.is_human());
    }
}
