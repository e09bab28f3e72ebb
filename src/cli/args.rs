//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    count_positions::CountPositionsArgs, play::PlayArgs, pvp::PvpArgs, watch::WatchArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "chess-ai",
    about = "A chess engine with a time-budgeted alpha-beta search ♛"
)]
pub enum Chess {
    #[structopt(
        name = "play",
        about = "Play a game against the computer. Your color is chosen at random unless you specify it with `--color`. The computer searches with the `--strategy` evaluation (full or material, default: full) and spends its `--time` clock (default: 900 seconds) with iterative deepening. With `--history-dir`, the computer's move-ordering history is kept between games in that directory."
    )]
    Play(PlayArgs),
    #[structopt(
        name = "pvp",
        about = "Play a game against another human on this local machine, with `--time` seconds on each clock (default: 900)."
    )]
    Pvp(PvpArgs),
    #[structopt(
        name = "watch",
        about = "Watch the computer play against itself. Each side has its own strategy (`--white-strategy`, `--black-strategy`) and history file in `--history-dir`."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "count-positions",
        about = "Count the legal positions reachable from the starting position at each depth up to `--depth` (default: 4), and report the time it took."
    )]
    CountPositions(CountPositionsArgs),
}

impl crate::cli::commands::Command for Chess {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Play(cmd),
            Pvp(cmd),
            Watch(cmd),
            CountPositions(cmd),
        }
    }
}
