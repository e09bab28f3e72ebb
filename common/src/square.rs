//! Board coordinates.
//!
//! Files and ranks are both 1-based, so `a1` is `(1, 1)` and `h8` is `(8, 8)`.
//! Anything off the board is unrepresentable: constructors and offsets return
//! `None` instead of a sentinel value.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

static ALGEBRAIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new("^([a-hA-H])([1-8])$").unwrap());

const FILE_CHARS: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if (1..=8).contains(&file) && (1..=8).contains(&rank) {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// Builds a square from a 0..64 index where a1 is 0, b1 is 1 and h8 is 63.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= 64 {
            return None;
        }
        Some(Self {
            file: (index % 8) as u8 + 1,
            rank: (index / 8) as u8 + 1,
        })
    }

    #[inline]
    pub fn file(&self) -> u8 {
        self.file
    }

    #[inline]
    pub fn rank(&self) -> u8 {
        self.rank
    }

    #[inline]
    pub fn index(&self) -> usize {
        (self.rank as usize - 1) * 8 + (self.file as usize - 1)
    }

    /// Returns the square `file_delta` files and `rank_delta` ranks away, if it
    /// is still on the board.
    #[inline]
    pub fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file as i8 + file_delta;
        let rank = self.rank as i8 + rank_delta;
        if (1..=8).contains(&file) && (1..=8).contains(&rank) {
            Some(Self {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    pub fn file_char(&self) -> char {
        FILE_CHARS[self.file as usize - 1]
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_index)
    }
}

/// Converts a file letter (`a`..`h`, either case) to its 1-based number.
pub fn file_from_char(c: char) -> Option<u8> {
    let lower = c.to_ascii_lowercase();
    FILE_CHARS
        .iter()
        .position(|&f| f == lower)
        .map(|i| i as u8 + 1)
}

/// Converts a 1-based file number to its letter.
pub fn file_to_char(file: u8) -> Option<char> {
    if (1..=8).contains(&file) {
        Some(FILE_CHARS[file as usize - 1])
    } else {
        None
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank)
    }
}

type ParseError = &'static str;

impl FromStr for Square {
    type Err = ParseError;

    fn from_str(algebraic: &str) -> Result<Self, Self::Err> {
        let caps = ALGEBRAIC_RE
            .captures(algebraic)
            .ok_or("invalid square; expected a file a-h followed by a rank 1-8")?;
        let file = caps[1]
            .chars()
            .next()
            .and_then(file_from_char)
            .ok_or("invalid file")?;
        let rank = caps[2]
            .parse::<u8>()
            .map_err(|_| "invalid rank")?;
        Square::new(file, rank).ok_or("square is off the board")
    }
}

macro_rules! named_squares {
    ($($name:ident = ($file:expr, $rank:expr),)*) => {
        $(pub const $name: Square = Square { file: $file, rank: $rank };)*
    };
}

#[rustfmt::skip]
named_squares! {
    A1 = (1, 1),
    B1 = (2, 1),
    C1 = (3, 1),
    D1 = (4, 1),
    E1 = (5, 1),
    F1 = (6, 1),
    G1 = (7, 1),
    H1 = (8, 1),
    A2 = (1, 2),
    B2 = (2, 2),
    C2 = (3, 2),
    D2 = (4, 2),
    E2 = (5, 2),
    F2 = (6, 2),
    G2 = (7, 2),
    H2 = (8, 2),
    A3 = (1, 3),
    B3 = (2, 3),
    C3 = (3, 3),
    D3 = (4, 3),
    E3 = (5, 3),
    F3 = (6, 3),
    G3 = (7, 3),
    H3 = (8, 3),
    A4 = (1, 4),
    B4 = (2, 4),
    C4 = (3, 4),
    D4 = (4, 4),
    E4 = (5, 4),
    F4 = (6, 4),
    G4 = (7, 4),
    H4 = (8, 4),
    A5 = (1, 5),
    B5 = (2, 5),
    C5 = (3, 5),
    D5 = (4, 5),
    E5 = (5, 5),
    F5 = (6, 5),
    G5 = (7, 5),
    H5 = (8, 5),
    A6 = (1, 6),
    B6 = (2, 6),
    C6 = (3, 6),
    D6 = (4, 6),
    E6 = (5, 6),
    F6 = (6, 6),
    G6 = (7, 6),
    H6 = (8, 6),
    A7 = (1, 7),
    B7 = (2, 7),
    C7 = (3, 7),
    D7 = (4, 7),
    E7 = (5, 7),
    F7 = (6, 7),
    G7 = (7, 7),
    H7 = (8, 7),
    A8 = (1, 8),
    B8 = (2, 8),
    C8 = (3, 8),
    D8 = (4, 8),
    E8 = (5, 8),
    F8 = (6, 8),
    G8 = (7, 8),
    H8 = (8, 8),
}
