use std::fmt;

use common::Square;

use super::BoardState;

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "   +------------------------+")?;
        for rank in (1..=8u8).rev() {
            write!(f, " {} |", rank)?;
            for file in 1..=8u8 {
                let c = Square::new(file, rank)
                    .and_then(|square| self.get(square))
                    .map(|(color, kind)| kind.to_char(color))
                    .unwrap_or('.');
                write!(f, " {} ", c)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "   +------------------------+")?;
        write!(f, "     a  b  c  d  e  f  g  h")
    }
}

/// Builds a `BoardState` from an 8x8 diagram drawn from white's perspective.
/// Uppercase letters are white pieces, lowercase black, `.` an empty square.
/// White is to move and every piece starts unmoved.
#[macro_export]
macro_rules! chess_position {
    ($($piece:tt)*) => {{
        let mut board = $crate::board::BoardState::new();
        // Convert all input tokens to a string and filter out whitespace characters.
        let pieces: Vec<_> = stringify!($($piece)*)
            .chars()
            .filter(|&c| !c.is_whitespace())
            .collect();
        assert_eq!(pieces.len(), 64, "Invalid number of squares. Expected 64, got {}", pieces.len());
        for (i, &c) in pieces.iter().enumerate() {
            if c != '.' {
                let (kind, color) = $crate::board::piece::PieceKind::from_char(c)
                    .expect("Invalid character in chess position");
                // The first character is a8, so the rows run top to bottom.
                let row = i / 8;
                let col = i % 8;
                let transposed_row = 7 - row;
                let square = $crate::board::Square::from_index(8 * transposed_row + col)
                    .expect("square index out of range");
                board.put(square, kind, color).unwrap();
            }
        }
        board
    }};
}
