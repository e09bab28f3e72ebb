//! Count positions command - count the leaves of the legal move tree.

use std::time::Instant;

use chess_ai::board::BoardState;
use chess_ai::move_generator::count_positions;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct CountPositionsArgs {
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
}

impl Command for CountPositionsArgs {
    fn execute(self) {
        let board = BoardState::starting_position();
        for depth in 1..=self.depth {
            let started = Instant::now();
            let count = count_positions(&board, depth);
            let elapsed = started.elapsed();
            let per_second = count as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
            println!(
                "depth: {}, positions: {}, took: {:?} ({:.0} positions/s)",
                depth, count, elapsed, per_second
            );
        }
    }
}
