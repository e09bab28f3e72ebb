use core::fmt;
use std::hash::{Hash, Hasher};

use common::Square;

use crate::board::piece::PieceKind;

/// The three fields that identify a move: origin, destination and the kind of
/// the moving piece. Promotion choice and the castle/en passant flags are not
/// part of it, so two promotions that differ only in the chosen piece share a
/// key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct MoveKey {
    pub kind: PieceKind,
    pub from: Square,
    pub to: Square,
}

#[derive(Clone, Copy, Debug)]
pub struct ChessMove {
    from: Square,
    to: Square,
    kind: PieceKind,
    promotion: Option<PieceKind>,
    is_castle: bool,
    is_en_passant: bool,
}

impl ChessMove {
    pub fn new(from: Square, to: Square, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            kind,
            promotion: None,
            is_castle: false,
            is_en_passant: false,
        }
    }

    /// A king move two files along its rank; the rook follows when applied.
    pub fn castle(from: Square, to: Square) -> Self {
        Self {
            is_castle: true,
            ..Self::new(from, to, PieceKind::King)
        }
    }

    pub fn en_passant(from: Square, to: Square) -> Self {
        Self {
            is_en_passant: true,
            ..Self::new(from, to, PieceKind::Pawn)
        }
    }

    pub fn with_promotion(mut self, promotion: PieceKind) -> Self {
        self.promotion = Some(promotion);
        self
    }

    #[inline]
    pub fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Square {
        self.to
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.is_castle
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.is_en_passant
    }

    #[inline]
    pub fn key(&self) -> MoveKey {
        MoveKey {
            kind: self.kind,
            from: self.from,
            to: self.to,
        }
    }
}

impl PartialEq for ChessMove {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ChessMove {}

impl Hash for ChessMove {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) to ({})", self.kind, self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, " promoting to {}", promotion)?;
        }
        if self.is_castle {
            write!(f, " castling")?;
        }
        if self.is_en_passant {
            write!(f, " en passant")?;
        }
        Ok(())
    }
}

impl fmt::Display for MoveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) to ({})", self.kind, self.from, self.to)
    }
}

/// Shorthand for a plain move: `std_move!(E2, E4, Pawn)`.
#[macro_export]
macro_rules! std_move {
    ($from:expr, $to:expr, $kind:ident) => {
        $crate::chess_move::ChessMove::new($from, $to, $crate::board::piece::PieceKind::$kind)
    };
}
