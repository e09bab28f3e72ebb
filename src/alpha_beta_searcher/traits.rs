//! Core traits for generic alpha-beta search.

use std::fmt::Debug;

/// A node of a two-player zero-sum game tree. Nodes are produced by
/// `MoveGenerator::successor` and carry whatever annotations that call
/// computed for them.
pub trait GameState: Clone {
    /// True when the game is over at this node.
    fn is_terminal(&self) -> bool;

    /// Cached utility from the maximizing player's point of view. Only
    /// meaningful for terminal nodes and for nodes expanded as a frontier.
    fn utility(&self) -> i32;

    /// How far the cached utility moved away from the parent's. A large swing
    /// marks a position that is still unsettled and worth a quiescence ply.
    fn utility_swing(&self) -> i32;
}

/// How much work `MoveGenerator::successor` should do on the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// The child will be recursed into; only the terminal flag (and a
    /// terminal utility) is needed.
    Interior,
    /// The child sits at the search horizon and must carry its utility and
    /// its swing from `parent_utility`.
    Frontier { parent_utility: i32 },
}

/// Generates moves and successor states.
pub trait MoveGenerator<S: GameState> {
    type Move: Clone + Debug;
    type MoveList: MoveCollection<Self::Move>;
    type Error: Debug;

    /// Generates all legal moves for the player to move.
    fn generate_moves(&self, state: &S) -> Self::MoveList;

    /// Produces the state reached by playing `game_move`. `state` is left
    /// untouched.
    fn successor(
        &self,
        state: &S,
        game_move: &Self::Move,
        expansion: Expansion,
    ) -> Result<S, Self::Error>;
}

/// Evaluates a game position and returns a score.
pub trait Evaluator<S: GameState> {
    /// Evaluates the given state. Higher scores favor the maximizing player.
    fn evaluate(&self, state: &S) -> i32;
}

/// Remembers which moves paid off, so they can be tried first later.
pub trait MoveHistory<M> {
    fn score(&self, game_move: &M) -> u32;

    /// Credits `game_move` with a cutoff or with being a node's best move.
    fn record(&mut self, game_move: &M);
}

/// Abstraction over move collections (Vec, SmallVec, etc.)
pub trait MoveCollection<M>: AsRef<[M]> + AsMut<[M]> {
    #[inline]
    fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

impl<M> MoveCollection<M> for Vec<M> {}
