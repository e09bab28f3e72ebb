//! Static evaluation of a position.
//!
//! Scores are always from the max side's point of view. Terminal positions
//! short-circuit to the checkmate or draw values; everything else is scored by
//! the configured `Strategy`.

use std::fmt;
use std::str::FromStr;

use crate::board::color::Color;
use crate::board::piece::PieceKind;
use crate::board::BoardState;
use crate::move_generator::{in_check, legal_moves};

mod king_safety;
mod phase;
pub mod piece_values;
mod rooks;

#[cfg(test)]
mod tests;

pub const CHECKMATE_VALUE: i32 = 100_000;
pub const DRAW_VALUE: i32 = 0;

/// Below this much opponent material (kings excluded) the endgame term
/// replaces the opening term.
pub const END_GAME_CUTOFF: i32 = 15_000;

const SAFETY_THRESHOLD: i32 = 125;
const QUEEN_BONUS_WEAK_KING: i32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnding {
    Checkmate,
    Stalemate,
    /// The recent-move window shows the same four plies twice.
    Draw,
}

/// Which static evaluation to run on non-terminal positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Material plus king safety, rook activity and game-phase terms.
    FullHeuristic = 0,
    /// The incrementally maintained material differential only.
    MaterialOnly = 1,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::FullHeuristic
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::FullHeuristic => "full",
            Strategy::MaterialOnly => "material",
        };
        write!(f, "{}", name)
    }
}

// used for parsing cli args
type ParseError = &'static str;
impl FromStr for Strategy {
    type Err = ParseError;
    fn from_str(strategy: &str) -> Result<Self, Self::Err> {
        match strategy {
            "0" | "full" => Ok(Strategy::FullHeuristic),
            "1" | "material" => Ok(Strategy::MaterialOnly),
            _ => Err("invalid strategy; options are: full (0), material (1)"),
        }
    }
}

/// Returns the game ending state if the game has ended, otherwise returns None.
/// Checkmate wins over a repetition draw when both apply.
pub fn game_ending(state: &BoardState) -> Option<GameEnding> {
    let has_moves = !legal_moves(state, true).is_empty();
    if !has_moves && in_check(state, state.turn()) {
        return Some(GameEnding::Checkmate);
    }
    if state.is_draw() {
        return Some(GameEnding::Draw);
    }
    if !has_moves {
        return Some(GameEnding::Stalemate);
    }
    None
}

/// The value of a finished game. The side to move is the one that got mated.
pub fn terminal_utility(state: &BoardState, ending: GameEnding) -> i32 {
    match ending {
        GameEnding::Checkmate if state.turn() == state.max_side() => -CHECKMATE_VALUE,
        GameEnding::Checkmate => CHECKMATE_VALUE,
        GameEnding::Stalemate | GameEnding::Draw => DRAW_VALUE,
    }
}

/// Full utility of `state` from the max side's point of view.
pub fn utility(state: &BoardState, is_opening: bool, strategy: Strategy) -> i32 {
    match game_ending(state) {
        Some(ending) => terminal_utility(state, ending),
        None => static_utility(state, is_opening, strategy),
    }
}

/// Utility of a position already known not to be terminal.
pub fn static_utility(state: &BoardState, is_opening: bool, strategy: Strategy) -> i32 {
    match strategy {
        Strategy::MaterialOnly => state.material_difference(),
        Strategy::FullHeuristic => full_heuristic(state, is_opening),
    }
}

fn full_heuristic(state: &BoardState, is_opening: bool) -> i32 {
    let max_side = state.max_side();
    let own = state.side(max_side);
    let opponent = state.side(max_side.opposite());

    let own_material = piece_values::side_material(own);
    let opponent_material = piece_values::side_material(opponent);
    let mut total = own_material - opponent_material;

    let safety = king_safety::safety_swing(state);
    if safety > SAFETY_THRESHOLD && own.has(PieceKind::Queen) {
        total += QUEEN_BONUS_WEAK_KING;
    } else if safety < -SAFETY_THRESHOLD && opponent.has(PieceKind::Queen) {
        total -= QUEEN_BONUS_WEAK_KING;
    }
    total += safety;

    total += rooks::rook_activity(state);

    if is_opening {
        total += phase::opening_term(state);
    } else if opponent_material < END_GAME_CUTOFF {
        total += phase::endgame_term(state);
    }

    total
}

/// Which sides still have a pawn on a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PawnFile {
    Shared,
    OpponentOnly,
    OwnOnly,
    Empty,
}

impl PawnFile {
    pub(crate) fn has_own_pawn(&self) -> bool {
        matches!(self, PawnFile::Shared | PawnFile::OwnOnly)
    }
}

pub(crate) fn pawn_file(state: &BoardState, file: u8, color: Color) -> PawnFile {
    let has_pawn = |color: Color| {
        state
            .side(color)
            .of_kind(PieceKind::Pawn)
            .any(|pawn| pawn.square.file() == file)
    };
    match (has_pawn(color), has_pawn(color.opposite())) {
        (true, true) => PawnFile::Shared,
        (false, true) => PawnFile::OpponentOnly,
        (true, false) => PawnFile::OwnOnly,
        (false, false) => PawnFile::Empty,
    }
}
