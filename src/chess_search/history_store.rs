//! Text-file persistence for a history table and the two castled flags.
//!
//! Layout, one item per line:
//!
//! ```text
//! 1            white has castled (0 or 1)
//! 0            black has castled (0 or 1)
//! 2            number of entries
//! Pawn 2 e 4 e 7 1
//! Knight 1 g 3 f 4 2
//! ```
//!
//! Each entry is `kind fromRank fromFile toRank toFile score age`. The age is
//! written one turn older than it is in memory, so a table read back at the
//! start of the next game has already aged by the turn that stored it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use common::square::file_from_char;
use common::Square;

use crate::board::color::Color;
use crate::board::piece::PieceKind;
use crate::chess_move::MoveKey;

use super::history_table::{HistoryEntry, HistoryTable};

static ENTRY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+) ([1-8]) ([a-h]) ([1-8]) ([a-h]) (\d+) (\d+)$")
        .expect("Failed to compile history entry regex")
});

#[derive(Error, Debug)]
pub enum HistoryStoreError {
    #[error("cannot access history store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed history store line {line}: {content:?}")]
    Malformed { line: usize, content: String },
}

/// What a history store file holds.
#[derive(Debug, Clone, Default)]
pub struct StoredHistory {
    pub castled: [bool; 2],
    pub table: HistoryTable,
}

impl StoredHistory {
    pub fn has_castled(&self, color: Color) -> bool {
        self.castled[color.index()]
    }
}

/// The history file of one AI session.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new<P: AsRef<Path>>(dir: P, session_id: &str) -> Self {
        Self {
            path: dir
                .as_ref()
                .join(format!("history_table_{}.txt", session_id)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<StoredHistory, HistoryStoreError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| HistoryStoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse(&contents)
    }

    /// Loads the stored history, falling back to an empty table when the file
    /// is missing or unreadable.
    pub fn load_or_default(&self) -> StoredHistory {
        match self.load() {
            Ok(stored) => {
                debug!(
                    "loaded {} history entries from {}",
                    stored.table.len(),
                    self.path.display()
                );
                stored
            }
            Err(error) => {
                warn!("starting with an empty history table: {}", error);
                StoredHistory::default()
            }
        }
    }

    pub fn store(&self, table: &HistoryTable, castled: [bool; 2]) -> Result<(), HistoryStoreError> {
        fs::write(&self.path, serialize(table, castled)).map_err(|source| HistoryStoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes an empty table with neither side castled.
    pub fn initialize(&self) -> Result<(), HistoryStoreError> {
        self.store(&HistoryTable::new(), [false; 2])
    }
}

fn serialize(table: &HistoryTable, castled: [bool; 2]) -> String {
    let entries = table.sorted_entries();
    let mut out = format!(
        "{}\n{}\n{}\n",
        castled[Color::White.index()] as u8,
        castled[Color::Black.index()] as u8,
        entries.len()
    );
    for (key, entry) in entries {
        out.push_str(&format!(
            "{} {} {} {} {} {} {}\n",
            key.kind,
            key.from.rank(),
            key.from.file_char(),
            key.to.rank(),
            key.to.file_char(),
            entry.score,
            entry.age + 1
        ));
    }
    out
}

fn parse(contents: &str) -> Result<StoredHistory, HistoryStoreError> {
    let mut lines = contents.lines().enumerate();
    let mut next_line = |expected: &str| {
        lines
            .next()
            .map(|(index, line)| (index + 1, line.trim()))
            .ok_or_else(|| HistoryStoreError::Malformed {
                line: 0,
                content: format!("missing {}", expected),
            })
    };

    let white = parse_flag(next_line("white castled flag")?)?;
    let black = parse_flag(next_line("black castled flag")?)?;
    let (count_line, count) = next_line("entry count")?;
    let count: usize = count.parse().map_err(|_| HistoryStoreError::Malformed {
        line: count_line,
        content: count.to_string(),
    })?;

    let mut stored = StoredHistory::default();
    stored.castled[Color::White.index()] = white;
    stored.castled[Color::Black.index()] = black;

    for _ in 0..count {
        let (line, content) = next_line("history entry")?;
        let (key, entry) = parse_entry(content).ok_or_else(|| HistoryStoreError::Malformed {
            line,
            content: content.to_string(),
        })?;
        stored.table.insert(key, entry);
    }

    Ok(stored)
}

fn parse_flag((line, content): (usize, &str)) -> Result<bool, HistoryStoreError> {
    match content {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(HistoryStoreError::Malformed {
            line,
            content: content.to_string(),
        }),
    }
}

fn parse_entry(content: &str) -> Option<(MoveKey, HistoryEntry)> {
    let captures = ENTRY_REGEX.captures(content)?;
    let square = |rank: usize, file: usize| {
        let rank = captures[rank].parse().ok()?;
        let file = file_from_char(captures[file].chars().next()?)?;
        Square::new(file, rank)
    };

    let key = MoveKey {
        kind: captures[1].parse().ok()?,
        from: square(2, 3)?,
        to: square(4, 5)?,
    };
    let entry = HistoryEntry {
        score: captures[6].parse().ok()?,
        age: captures[7].parse().ok()?,
    };
    Some((key, entry))
}
