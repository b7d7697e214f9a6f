//! # presentsim
//!
//! Runs one presentation pipeline scenario and prints the report to stdout.
//!
//! ```bash
//! presentsim --vblank_interval 16 --buffer_count 2 --swapchain_count 3 \
//!     --cpu_time 7 --cpu_time_variance 2 --gpu_time 12 --gpu_time_variance 2 \
//!     --num_ticks 1000
//! ```

use std::io::{self, BufWriter};
use std::process::ExitCode;

use presentsim_app::AppError;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    presentsim_core::init();
    presentsim_app::init();

    let argv: Vec<String> = std::env::args().collect();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match presentsim_app::run(&argv, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Cli(err)) => err.exit(),
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
