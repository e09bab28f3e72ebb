use std::fmt::Write;
use std::time::Duration;

use common::Square;
use termion::{clear, cursor};

use crate::board::color::Color;

use super::game::Game;

/// Builds each frame in a buffer and prints it in one go.
pub struct GameDisplay {
    buffer: String,
    clear_screen: bool,
}

impl Default for GameDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl GameDisplay {
    pub fn new() -> Self {
        Self {
            buffer: String::with_capacity(2048),
            clear_screen: true,
        }
    }

    /// A display that appends frames instead of redrawing the screen.
    pub fn without_clearing() -> Self {
        Self {
            clear_screen: false,
            ..Self::new()
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        if self.clear_screen {
            // writing to a String cannot fail
            let _ = write!(self.buffer, "{}{}", cursor::Goto(1, 1), clear::All);
        }
    }

    pub fn render_game_state(&mut self, game: &Game) {
        self.clear();
        self.push_board(game);

        let _ = writeln!(self.buffer, "Current Turn: {}", game.turn());
        if let Some(last_move) = game.last_move() {
            let _ = writeln!(self.buffer, "Previous Move: {}", last_move);
        }
        let _ = writeln!(
            self.buffer,
            "Current Player: {}",
            game.current_player().name()
        );
        for &color in [Color::White, Color::Black].iter() {
            let _ = writeln!(
                self.buffer,
                "{} Time Remaining: {}",
                color.name(),
                format_clock(game.time_remaining(color))
            );
        }

        print!("{}", self.buffer);
    }

    fn push_board(&mut self, game: &Game) {
        self.buffer.push_str("    a   b   c   d   e   f   g   h\n");
        self.buffer
            .push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        for rank in (1..=8u8).rev() {
            let _ = write!(self.buffer, "{} │", rank);
            for file in 1..=8u8 {
                let piece = Square::new(file, rank)
                    .and_then(|square| game.state().get(square))
                    .map(|(color, kind)| kind.to_unicode_piece_char(color));
                let symbol = match piece {
                    Some(c) => c,
                    None if (rank + file) % 2 == 0 => '·',
                    None => ' ',
                };
                let _ = write!(self.buffer, " {} │", symbol);
            }
            let _ = writeln!(self.buffer, " {}", rank);

            if rank > 1 {
                self.buffer
                    .push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            } else {
                self.buffer
                    .push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
            }
        }

        self.buffer
            .push_str("    a   b   c   d   e   f   g   h\n\n");
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

/// `M minutes S seconds`, rounded down to whole seconds.
pub fn format_clock(remaining: Duration) -> String {
    let seconds = remaining.as_secs();
    format!("{} minutes {} seconds", seconds / 60, seconds % 60)
}
