//! Alpha-beta search algorithm implementation.
//!
//! # Core Algorithm
//!
//! Alpha-beta pruning is an optimization of minimax search that maintains a window [alpha, beta]
//! representing the range of scores that matter. Moves that fall outside this window can be
//! pruned without affecting the final result. The algorithm guarantees finding the same move as
//! minimax but explores fewer nodes.
//!
//! ## Iterative Deepening
//! Searches at increasing depths (1..=max_depth) while the clock allows. Before starting the
//! next depth, the time spent so far is scaled by the estimated branching factor to predict the
//! cost of the next iteration; the search stops once that prediction would eat into the
//! reserved share of the remaining clock. Depth 1 always completes, so a move is always found.
//!
//! ## Move Ordering
//! Moves are stable-sorted by their `MoveHistory` score before expansion. The history is
//! credited with every move that causes a cutoff and with each node's best move, so it learns
//! across depths and across turns.
//!
//! ## Quiescence Extension
//! A frontier node whose utility swung by more than the configured threshold relative to its
//! parent is searched one more ply, up to a fixed number of extra plies per line. This avoids
//! the horizon effect where evaluation stops in the middle of an exchange.

use std::convert::Infallible;
use std::time::{Duration, Instant};

use log::{debug, info};
use thiserror::Error;

use crate::board::error::BoardError;

use super::{Evaluator, Expansion, GameState, MoveCollection, MoveGenerator, MoveHistory};

/// Initial half-width of the alpha-beta window. Matches the checkmate value,
/// so no score ever falls outside it.
pub const SCORE_BOUND: i32 = 100_000;

#[derive(Error, Debug, PartialEq)]
pub enum SearchError {
    #[error("no available moves")]
    NoAvailableMoves,
    #[error("depth must be at least 1")]
    DepthTooLow,
    #[error("failed to expand a search node: {0}")]
    Board(#[from] BoardError),
}

impl From<Infallible> for SearchError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Search configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// Extra plies a single line may be extended by at the horizon.
    pub quiescence_depth: u8,
    /// Utility swing above which a frontier node counts as unsettled.
    pub quiescence_threshold: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 20,
            quiescence_depth: 3,
            quiescence_threshold: 2000,
        }
    }
}

/// The clock the search is allowed to spend from.
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    started: Instant,
    remaining: Duration,
    reserve_percent: u32,
}

impl TimeBudget {
    /// A budget starting now. `reserve_percent` is the share of `remaining`
    /// the predicted cost of the next depth must stay below.
    pub fn new(remaining: Duration, reserve_percent: u32) -> Self {
        Self {
            started: Instant::now(),
            remaining,
            reserve_percent,
        }
    }

    /// Never stops early. Useful for fixed-depth searches.
    pub fn unlimited() -> Self {
        Self::new(Duration::from_secs(u64::from(u32::MAX)), 100)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// True if another depth, predicted to cost `elapsed × breadth`, stays
    /// under `reserve_percent` of the remaining clock.
    pub fn allows_next_depth(&self, breadth: f64) -> bool {
        self.allows(self.elapsed(), breadth)
    }

    fn allows(&self, elapsed: Duration, breadth: f64) -> bool {
        let predicted = elapsed.as_secs_f64() * breadth;
        let reserve = self.remaining.as_secs_f64() * f64::from(self.reserve_percent) / 100.0;
        predicted < reserve
    }
}

/// Statistics collected during search.
#[derive(Debug, Default, Clone)]
struct SearchStats {
    position_count: usize,
    quiescence_extensions: usize,
    cutoffs: usize,
    depth_reached: u8,
    last_score: Option<i32>,
    last_duration: Option<Duration>,
}

impl SearchStats {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

pub struct SearchContext {
    config: SearchConfig,
    stats: SearchStats,
}

impl SearchContext {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    /// A context that searches exactly `depth` plies when the clock allows.
    pub fn with_depth(depth: u8) -> Self {
        Self::new(SearchConfig {
            max_depth: depth,
            ..SearchConfig::default()
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub fn searched_position_count(&self) -> usize {
        self.stats.position_count
    }

    pub fn quiescence_extensions(&self) -> usize {
        self.stats.quiescence_extensions
    }

    pub fn cutoffs(&self) -> usize {
        self.stats.cutoffs
    }

    /// Deepest iteration that completed during the last search.
    pub fn depth_reached(&self) -> u8 {
        self.stats.depth_reached
    }

    /// Root value of the deepest completed iteration.
    pub fn last_score(&self) -> Option<i32> {
        self.stats.last_score
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.stats.last_duration
    }
}

/// Searches for the best move with iterative deepening until the depth limit
/// or the time budget runs out.
///
/// # Returns
/// The move chosen by the deepest completed iteration, or
/// `SearchError::NoAvailableMoves` when the player to move has none.
pub fn alpha_beta_search<S, G, E, H>(
    context: &mut SearchContext,
    state: &S,
    move_generator: &G,
    evaluator: &E,
    history: &mut H,
    budget: &TimeBudget,
) -> Result<G::Move, SearchError>
where
    S: GameState,
    G: MoveGenerator<S>,
    E: Evaluator<S>,
    H: MoveHistory<G::Move>,
    SearchError: From<G::Error>,
{
    context.reset_stats();
    if context.config.max_depth == 0 {
        return Err(SearchError::DepthTooLow);
    }

    let root_moves = move_generator.generate_moves(state);
    let first_move = match root_moves.as_ref().first() {
        Some(first_move) => first_move.clone(),
        None => return Err(SearchError::NoAvailableMoves),
    };
    let first_child = move_generator.successor(state, &first_move, Expansion::Interior)?;
    let breadth =
        (root_moves.len() + move_generator.generate_moves(&first_child).len()) as f64 / 2.0;

    let mut searcher = Searcher {
        config: context.config,
        stats: &mut context.stats,
        move_generator,
        evaluator,
        history,
    };

    let mut best_move = None;
    for depth in 1..=searcher.config.max_depth {
        if depth > 1 && !budget.allows_next_depth(breadth) {
            debug!(
                "stopping before depth {} after {:?} (breadth {:.1})",
                depth,
                budget.elapsed(),
                breadth
            );
            break;
        }

        let (game_move, score) = searcher.search_root(state, depth)?;
        debug!(
            "depth {} complete: {:?} scores {} ({} positions, {} cutoffs)",
            depth, game_move, score, searcher.stats.position_count, searcher.stats.cutoffs
        );
        searcher.stats.depth_reached = depth;
        searcher.stats.last_score = Some(score);
        best_move = Some(game_move);
    }

    let elapsed = budget.elapsed();
    context.stats.last_duration = Some(elapsed);
    info!(
        "searched to depth {} in {:?}: {} positions",
        context.stats.depth_reached, elapsed, context.stats.position_count
    );

    best_move.ok_or(SearchError::NoAvailableMoves)
}

/// Borrowed collaborators for a single search.
struct Searcher<'a, G, E, H> {
    config: SearchConfig,
    stats: &'a mut SearchStats,
    move_generator: &'a G,
    evaluator: &'a E,
    history: &'a mut H,
}

impl<'a, G, E, H> Searcher<'a, G, E, H> {
    fn search_root<S>(&mut self, state: &S, depth: u8) -> Result<(G::Move, i32), SearchError>
    where
        S: GameState,
        G: MoveGenerator<S>,
        E: Evaluator<S>,
        H: MoveHistory<G::Move>,
        SearchError: From<G::Error>,
    {
        self.stats.position_count += 1;
        let moves = self.ordered_moves(state);
        let expansion = self.child_expansion(state, depth, false);

        let mut alpha = -SCORE_BOUND;
        let beta = SCORE_BOUND;
        let quiescence = self.config.quiescence_depth;
        let mut best_move = None;

        for game_move in moves.as_ref() {
            let child = self.move_generator.successor(state, game_move, expansion)?;
            let value = self.min_value(&child, depth - 1, alpha, beta, quiescence)?;
            if value > alpha {
                alpha = value;
                best_move = Some(game_move.clone());
            }
        }

        let best_move = match best_move.or_else(|| moves.as_ref().first().cloned()) {
            Some(best_move) => best_move,
            None => return Err(SearchError::NoAvailableMoves),
        };
        self.history.record(&best_move);
        Ok((best_move, alpha))
    }

    fn max_value<S>(
        &mut self,
        state: &S,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        quiescence: u8,
    ) -> Result<i32, SearchError>
    where
        S: GameState,
        G: MoveGenerator<S>,
        E: Evaluator<S>,
        H: MoveHistory<G::Move>,
        SearchError: From<G::Error>,
    {
        self.stats.position_count += 1;
        let (depth, quiescence, extended) = match self.horizon(state, depth, quiescence) {
            Horizon::Stop(value) => return Ok(value),
            Horizon::Continue(depth, quiescence, extended) => (depth, quiescence, extended),
        };

        let moves = self.ordered_moves(state);
        if moves.is_empty() {
            return Ok(self.evaluator.evaluate(state));
        }
        let expansion = self.child_expansion(state, depth, extended);

        // the best child is credited even when none of them raises alpha
        let mut best_move = None;
        let mut best_value = -SCORE_BOUND;
        for game_move in moves.as_ref() {
            let child = self.move_generator.successor(state, game_move, expansion)?;
            let value = self.min_value(&child, depth - 1, alpha, beta, quiescence)?;
            if best_move.is_none() || value > best_value {
                best_value = value;
                best_move = Some(game_move);
            }
            alpha = alpha.max(value);
            if beta <= alpha {
                self.stats.cutoffs += 1;
                self.history.record(game_move);
                return Ok(alpha);
            }
        }

        if let Some(best_move) = best_move {
            self.history.record(best_move);
        }
        Ok(alpha)
    }

    fn min_value<S>(
        &mut self,
        state: &S,
        depth: u8,
        alpha: i32,
        mut beta: i32,
        quiescence: u8,
    ) -> Result<i32, SearchError>
    where
        S: GameState,
        G: MoveGenerator<S>,
        E: Evaluator<S>,
        H: MoveHistory<G::Move>,
        SearchError: From<G::Error>,
    {
        self.stats.position_count += 1;
        let (depth, quiescence, extended) = match self.horizon(state, depth, quiescence) {
            Horizon::Stop(value) => return Ok(value),
            Horizon::Continue(depth, quiescence, extended) => (depth, quiescence, extended),
        };

        let moves = self.ordered_moves(state);
        if moves.is_empty() {
            return Ok(self.evaluator.evaluate(state));
        }
        let expansion = self.child_expansion(state, depth, extended);

        let mut best_move = None;
        let mut best_value = SCORE_BOUND;
        for game_move in moves.as_ref() {
            let child = self.move_generator.successor(state, game_move, expansion)?;
            let value = self.max_value(&child, depth - 1, alpha, beta, quiescence)?;
            if best_move.is_none() || value < best_value {
                best_value = value;
                best_move = Some(game_move);
            }
            beta = beta.min(value);
            if beta <= alpha {
                self.stats.cutoffs += 1;
                self.history.record(game_move);
                return Ok(beta);
            }
        }

        if let Some(best_move) = best_move {
            self.history.record(best_move);
        }
        Ok(beta)
    }

    /// Decides whether `state` is a leaf. Unsettled frontier nodes are
    /// extended by one ply while the line's quiescence budget lasts.
    fn horizon<S: GameState>(&mut self, state: &S, depth: u8, quiescence: u8) -> Horizon {
        if state.is_terminal() {
            return Horizon::Stop(state.utility());
        }
        if depth > 0 {
            return Horizon::Continue(depth, quiescence, false);
        }
        if state.utility_swing().abs() <= self.config.quiescence_threshold || quiescence == 0 {
            return Horizon::Stop(state.utility());
        }
        self.stats.quiescence_extensions += 1;
        Horizon::Continue(1, quiescence - 1, true)
    }

    /// Children one ply above the horizon are expanded as a frontier. The
    /// parent's utility is already cached when it was itself a frontier node.
    fn child_expansion<S>(&self, state: &S, depth: u8, extended: bool) -> Expansion
    where
        S: GameState,
        E: Evaluator<S>,
    {
        if depth > 1 {
            return Expansion::Interior;
        }
        let parent_utility = if extended {
            state.utility()
        } else {
            self.evaluator.evaluate(state)
        };
        Expansion::Frontier { parent_utility }
    }

    /// Legal moves, stable-sorted by descending history score.
    fn ordered_moves<S>(&self, state: &S) -> G::MoveList
    where
        S: GameState,
        G: MoveGenerator<S>,
        H: MoveHistory<G::Move>,
    {
        let mut moves = self.move_generator.generate_moves(state);
        let history = &*self.history;
        moves
            .as_mut()
            .sort_by_key(|game_move| std::cmp::Reverse(history.score(game_move)));
        moves
    }
}

enum Horizon {
    Stop(i32),
    /// Remaining depth, remaining quiescence budget, and whether this node
    /// was reached by a quiescence extension.
    Continue(u8, u8, bool),
}
