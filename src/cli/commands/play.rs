//! Play command - play a game against the computer.

use std::path::PathBuf;

use chess_ai::board::color::Color;
use chess_ai::evaluate::Strategy;
use structopt::StructOpt;

use super::util::{create_config, create_engine, create_human, run_game_loop};
use super::Command;

#[derive(StructOpt)]
pub struct PlayArgs {
    #[structopt(short = "c", long = "color", default_value = "random")]
    pub color: Color,
    #[structopt(short, long, default_value = "full")]
    pub strategy: Strategy,
    #[structopt(short, long, default_value = "900", help = "Seconds on each player's clock")]
    pub time: u64,
    #[structopt(short, long, default_value = "20")]
    pub depth: u8,
    #[structopt(long = "history-dir", parse(from_os_str))]
    pub history_dir: Option<PathBuf>,
}

impl Command for PlayArgs {
    fn execute(self) {
        let engine_color = self.color.opposite();
        let engine = create_engine(engine_color, self.strategy, self.history_dir, self.depth);
        let (white, black) = match self.color {
            Color::White => (create_human(), engine),
            Color::Black => (engine, create_human()),
        };
        run_game_loop(white, black, create_config(self.time), None);
    }
}
