//! A computer player: one search per turn, with a history table that carries
//! over between turns and, through the history store, between games.

use std::path::PathBuf;
use std::time::Duration;

use log::{info, warn};

use crate::alpha_beta_searcher::{SearchConfig, SearchContext, SearchError, TimeBudget};
use crate::board::color::Color;
use crate::board::BoardState;
use crate::chess_move::ChessMove;
use crate::evaluate::Strategy;

use super::history_store::HistoryStore;
use super::history_table::HistoryTable;
use super::implementation::search_best_move;

/// Share of the remaining clock the next depth's predicted cost must stay under.
pub const RESERVE_PERCENT: u32 = 8;
pub const OPENING_RESERVE_PERCENT: u32 = 7;

/// Plies after which the opening always ends.
const OPENING_HARD_LIMIT: u32 = 30;
/// Plies before which the opening never ends.
const OPENING_SOFT_LIMIT: u32 = 20;

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub strategy: Strategy,
    /// Names the history store file; one per player.
    pub session_id: String,
    /// Where the history store lives. `None` keeps the table in memory only.
    pub history_dir: Option<PathBuf>,
    pub search: SearchConfig,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            session_id: "0".to_string(),
            history_dir: None,
            search: SearchConfig::default(),
        }
    }
}

/// The opening lasts until ply 20, and past it until ply 30 for a side that
/// has not castled yet.
pub fn is_opening(state: &BoardState, turn: u32) -> bool {
    turn < OPENING_HARD_LIMIT && (turn < OPENING_SOFT_LIMIT || !state.has_castled(state.turn()))
}

pub struct AiSession {
    config: AiConfig,
    context: SearchContext,
    history: HistoryTable,
    store: Option<HistoryStore>,
    castled: [bool; 2],
}

impl AiSession {
    pub fn new(config: AiConfig) -> Self {
        let store = config
            .history_dir
            .as_ref()
            .map(|dir| HistoryStore::new(dir, &config.session_id));
        Self {
            context: SearchContext::new(config.search),
            config,
            history: HistoryTable::new(),
            store,
            castled: [false; 2],
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.config.strategy
    }

    pub fn history(&self) -> &HistoryTable {
        &self.history
    }

    /// Statistics of the last search.
    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    pub fn has_castled(&self, color: Color) -> bool {
        self.castled[color.index()]
    }

    /// Chooses a move for the side to move in `state`.
    ///
    /// `remaining` is that side's clock and `turn` the number of plies played
    /// so far. On the first two plies the stored history is loaded; after the
    /// search the table is written back and aged by one turn.
    pub fn run_turn(
        &mut self,
        state: &BoardState,
        remaining: Duration,
        turn: u32,
    ) -> Result<ChessMove, SearchError> {
        let color = state.turn();
        let mut root = state.clone().with_max_side(color);

        if turn < 2 {
            self.load_history();
        }
        // a remembered flag only counts once that side's king has moved
        for &side in Color::ALL.iter() {
            if self.castled[side.index()] && king_has_moved(&root, side) {
                root.set_castled(side, true);
            }
            self.castled[side.index()] = root.has_castled(side);
        }

        let opening = is_opening(&root, turn);
        let reserve = if opening {
            OPENING_RESERVE_PERCENT
        } else {
            RESERVE_PERCENT
        };
        let budget = TimeBudget::new(remaining, reserve);

        let chess_move = search_best_move(
            &mut self.context,
            &root,
            self.config.strategy,
            opening,
            &mut self.history,
            &budget,
        )?;
        if chess_move.is_castle() {
            self.castled[color.index()] = true;
        }

        self.store_history();
        self.history.age();

        info!(
            "{} plays {} after reaching depth {} ({} strategy)",
            color.name(),
            chess_move,
            self.context.depth_reached(),
            self.config.strategy
        );
        Ok(chess_move)
    }

    fn load_history(&mut self) {
        if let Some(store) = &self.store {
            let stored = store.load_or_default();
            self.history = stored.table;
            for &side in Color::ALL.iter() {
                self.castled[side.index()] |= stored.castled[side.index()];
            }
        }
    }

    fn store_history(&self) {
        if let Some(store) = &self.store {
            if let Err(error) = store.store(&self.history, self.castled) {
                warn!("failed to store history table: {}", error);
            }
        }
    }
}

fn king_has_moved(state: &BoardState, color: Color) -> bool {
    state
        .king_square(color)
        .and_then(|square| state.piece_at(square))
        .map_or(false, |king| king.has_moved)
}
