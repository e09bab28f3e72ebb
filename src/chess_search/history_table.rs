//! History heuristic for chess move ordering.
//!
//! Tracks which moves cause cutoffs or end up as a node's best move, keyed by
//! the moving piece kind plus origin and destination. Entries age once per
//! turn; stale or rarely useful entries are purged when the table fills up.

use rustc_hash::FxHashMap;

use crate::alpha_beta_searcher::MoveHistory;
use crate::chess_move::{ChessMove, MoveKey};

/// Size at which `record` purges before inserting a new entry.
pub const HISTORY_CAPACITY: usize = 300;

/// Entries this many turns old are dropped by `purge`.
pub const AGE_BARRIER: u32 = 6;

/// Entries credited fewer times than this are dropped by `purge`.
pub const MIN_USEFUL_SCORE: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub score: u32,
    /// Turns since the entry was first inserted.
    pub age: u32,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryTable {
    entries: FxHashMap<MoveKey, HistoryEntry>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(HISTORY_CAPACITY, Default::default()),
        }
    }

    /// Returns the history score for `key`, or 0 if it has never been recorded.
    #[inline]
    pub fn lookup(&self, key: &MoveKey) -> u32 {
        self.entries.get(key).map_or(0, |entry| entry.score)
    }

    pub fn get(&self, key: &MoveKey) -> Option<&HistoryEntry> {
        self.entries.get(key)
    }

    /// Credits `key`. A new entry starts at score 1; if the table is full it
    /// is purged first. The insert happens even if the purge freed nothing.
    pub fn record(&mut self, key: MoveKey) {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.score += 1;
            return;
        }
        if self.entries.len() >= HISTORY_CAPACITY {
            self.purge();
        }
        self.entries.insert(key, HistoryEntry { score: 1, age: 0 });
    }

    /// Makes every entry one turn older.
    pub fn age(&mut self) {
        for entry in self.entries.values_mut() {
            entry.age += 1;
        }
    }

    /// Drops entries that are too old or were credited too rarely.
    pub fn purge(&mut self) {
        self.entries
            .retain(|_, entry| entry.age < AGE_BARRIER && entry.score >= MIN_USEFUL_SCORE);
    }

    /// Overwrites the entry for `key`. Used when loading a stored table.
    pub fn insert(&mut self, key: MoveKey, entry: HistoryEntry) {
        self.entries.insert(key, entry);
    }

    /// Entries in a stable order (by key), for writing to disk.
    pub fn sorted_entries(&self) -> Vec<(MoveKey, HistoryEntry)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(key, entry)| (*key, *entry))
            .collect();
        entries.sort_by_key(|(key, _)| *key);
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl MoveHistory<ChessMove> for HistoryTable {
    #[inline]
    fn score(&self, chess_move: &ChessMove) -> u32 {
        self.lookup(&chess_move.key())
    }

    #[inline]
    fn record(&mut self, chess_move: &ChessMove) {
        HistoryTable::record(self, chess_move.key());
    }
}
