//! PvP command - two humans at one terminal.

use structopt::StructOpt;

use super::util::{create_config, create_human, run_game_loop};
use super::Command;

#[derive(StructOpt)]
pub struct PvpArgs {
    #[structopt(short, long, default_value = "900", help = "Seconds on each player's clock")]
    pub time: u64,
}

impl Command for PvpArgs {
    fn execute(self) {
        run_game_loop(create_human(), create_human(), create_config(self.time), None);
    }
}
