//! Watch command - watch the computer play against itself.

use std::path::PathBuf;
use std::time::Duration;

use chess_ai::board::color::Color;
use chess_ai::evaluate::Strategy;
use structopt::StructOpt;

use super::util::{create_config, create_engine, run_game_loop};
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(long = "white-strategy", default_value = "full")]
    pub white_strategy: Strategy,
    #[structopt(long = "black-strategy", default_value = "material")]
    pub black_strategy: Strategy,
    #[structopt(short, long, default_value = "900", help = "Seconds on each player's clock")]
    pub time: u64,
    #[structopt(short, long, default_value = "20")]
    pub depth: u8,
    #[structopt(long = "history-dir", parse(from_os_str))]
    pub history_dir: Option<PathBuf>,
    #[structopt(
        long = "delay",
        default_value = "1000",
        help = "Delay between moves in milliseconds"
    )]
    pub delay_ms: u64,
}

impl Command for WatchArgs {
    fn execute(self) {
        let white = create_engine(
            Color::White,
            self.white_strategy,
            self.history_dir.clone(),
            self.depth,
        );
        let black = create_engine(Color::Black, self.black_strategy, self.history_dir, self.depth);
        run_game_loop(
            white,
            black,
            create_config(self.time),
            Some(Duration::from_millis(self.delay_ms)),
        );
    }
}
