//! # presentsim app
//!
//! Command line front end for the presentation pipeline simulator.
//!
//! ## Overview
//!
//! - [`CliArgs`] - clap argument definitions and conversion into a [`SimConfig`]
//! - [`report`] - Banner, per-vblank records and summary block
//! - [`run`] - Parse arguments, simulate and stream the report to a writer
//!
//! ## Example
//!
//! ```
//! let argv = ["presentsim", "--num_ticks", "64"].map(String::from);
//! let mut out = Vec::new();
//! presentsim_app::run(&argv, &mut out).unwrap();
//!
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.starts_with("RUN WITH SETTINGS:"));
//! ```

mod args;
pub mod report;

pub use args::{CliArgs, parse_args, parse_lenient};

use std::fmt;
use std::io::{self, Write};

use presentsim_core::{ConfigError, SimConfig, Simulation};

/// App library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the app subsystem.
pub fn init() {
    log::info!("presentsim app v{} initialized", VERSION);
}

/// Errors that end a run before or while writing the report.
#[derive(Debug)]
pub enum AppError {
    /// `--help` or `--version` was requested; clap holds the text to print.
    Cli(clap::Error),
    /// The scenario cannot be simulated.
    Config(ConfigError),
    /// Writing the report failed.
    Io(io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Cli(err) => write!(f, "{err}"),
            AppError::Config(err) => write!(f, "invalid configuration: {err}"),
            AppError::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Cli(err) => Some(err),
            AppError::Config(err) => Some(err),
            AppError::Io(err) => Some(err),
        }
    }
}

impl From<clap::Error> for AppError {
    fn from(err: clap::Error) -> Self {
        AppError::Cli(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

/// Parse `argv`, run the scenario and write the full report to `out`.
///
/// The configuration is validated before anything is written, so a rejected
/// scenario leaves `out` untouched.
pub fn run<W: Write>(argv: &[String], out: &mut W) -> Result<(), AppError> {
    let args = args::parse_args(argv)?;
    let config = SimConfig::from(args);
    let mut sim = Simulation::new(config)?;
    log::debug!("Running {:?}", sim.config());

    report::write_banner(out, argv)?;

    let mut write_result = Ok(());
    let summary = sim.run_with(|event| {
        if write_result.is_ok() {
            write_result = report::write_event(out, event);
        }
    });
    write_result?;

    report::write_summary(out, &summary)?;
    out.flush()?;
    Ok(())
}
