use std::io::BufRead;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use common::Square;

use crate::board::piece::{PieceKind, PROMOTION_KINDS};

static COORDINATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^([a-h][1-8])([a-h][1-8])([qnrb])?$").expect("Failed to compile coordinate regex")
});

static EXIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new("^(exit|quit)$").expect("Failed to compile exit regex"));

#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("io error: {error:?}")]
    IOError { error: String },
    #[error("invalid input: {input:?}")]
    InvalidInput { input: String },
    #[error("user requested exit")]
    UserExit,
}

/// A move as typed by a player, e.g. `e2e4` or `e7e8q`. The piece kind is
/// taken from the board when the input is matched against the legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInput {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl FromStr for MoveInput {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_ascii_lowercase();
        if EXIT_REGEX.is_match(&raw) {
            return Err(InputError::UserExit);
        }
        let invalid = || InputError::InvalidInput {
            input: s.trim().to_string(),
        };

        let captures = COORDINATE_REGEX.captures(&raw).ok_or_else(invalid)?;
        let from: Square = captures[1].parse().map_err(|_| invalid())?;
        let to: Square = captures[2].parse().map_err(|_| invalid())?;
        let promotion = match captures.get(3) {
            Some(m) => Some(m.as_str().parse::<PieceKind>().map_err(|_| invalid())?),
            None => None,
        };

        Ok(MoveInput {
            from,
            to,
            promotion,
        })
    }
}

fn read_line<R: BufRead>(reader: &mut R) -> Result<String, InputError> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        // end of input ends the game like an explicit exit
        Ok(0) => Err(InputError::UserExit),
        Ok(_) => Ok(input.trim().to_string()),
        Err(error) => Err(InputError::IOError {
            error: error.to_string(),
        }),
    }
}

/// Reads one line and parses it as a coordinate move.
pub fn parse_move_input<R: BufRead>(reader: &mut R) -> Result<MoveInput, InputError> {
    read_line(reader)?.parse()
}

/// Asks until the player names one of the promotion pieces.
pub fn prompt_promotion<R: BufRead>(reader: &mut R) -> Result<PieceKind, InputError> {
    loop {
        println!("Promote to (Queen, Knight, Rook, Bishop):");
        let raw = read_line(reader)?;
        if EXIT_REGEX.is_match(&raw.to_ascii_lowercase()) {
            return Err(InputError::UserExit);
        }
        match raw.parse::<PieceKind>() {
            Ok(kind) if PROMOTION_KINDS.contains(&kind) => return Ok(kind),
            _ => println!("invalid promotion piece: {}", raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::square::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(
            "e2e4".parse::<MoveInput>(),
            Ok(MoveInput {
                from: E2,
                to: E4,
                promotion: None
            })
        );
        assert_eq!(
            " E7E8N \n".parse::<MoveInput>(),
            Ok(MoveInput {
                from: E7,
                to: E8,
                promotion: Some(PieceKind::Knight)
            })
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "e2", "e2e9", "i2e4", "e7e8k", "Nf3"].iter() {
            assert!(
                matches!(
                    input.parse::<MoveInput>(),
                    Err(InputError::InvalidInput { .. })
                ),
                "{} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_exit() {
        assert_eq!("quit".parse::<MoveInput>(), Err(InputError::UserExit));
        let mut empty = Cursor::new("");
        assert_eq!(parse_move_input(&mut empty), Err(InputError::UserExit));
    }

    #[test]
    fn test_prompt_promotion_reprompts() {
        let mut input = Cursor::new("king\npawn\nrook\n");
        assert_eq!(prompt_promotion(&mut input), Ok(PieceKind::Rook));

        let mut input = Cursor::new("b\n");
        assert_eq!(prompt_promotion(&mut input), Ok(PieceKind::Bishop));
    }
}
