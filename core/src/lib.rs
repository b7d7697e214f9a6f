//! # presentsim core
//!
//! Deterministic, tick-based simulation of a graphics presentation pipeline:
//! a CPU recording frames into a ring of fenced buffers, a single serial GPU
//! rendering them into swapchain images, and a display flipping to a new
//! image once per vblank.
//!
//! ## Overview
//!
//! - [`Simulation`] - Tick driver owning all pipeline state for one scenario
//! - [`SimConfig`] - Scenario parameters and their clamps
//! - [`Jitter`] - Seeded, unbiased duration jitter
//! - [`stages`] - CPU, GPU and presentation stages
//! - [`Summary`] - Hit/miss counts with frame-time and lag statistics
//!
//! ## Example
//!
//! ```
//! use presentsim_core::{SimConfig, Simulation, VblankEvent};
//!
//! let config = SimConfig::default().with_buffer_count(2);
//! let mut sim = Simulation::new(config).unwrap();
//! let summary = sim.run_with(|event| {
//!     if let VblankEvent::Missed { tick } = event {
//!         println!("missed vblank at {tick}");
//!     }
//! });
//! println!("{} frames presented", summary.hits);
//! ```

pub mod buffers;
pub mod config;
pub mod error;
pub mod event;
pub mod jitter;
pub mod pipeline;
pub mod profiling;
pub mod stages;
pub mod stats;
pub mod swapchain;
pub mod work;

pub use config::SimConfig;
pub use error::{ConfigError, PoolError};
pub use event::{PresentedFrame, VblankEvent};
pub use jitter::Jitter;
pub use pipeline::{InvariantViolation, RunReport, Simulation};
pub use stats::{SampleStats, Summary};

/// Discrete simulation time. One tick is treated as one millisecond.
pub type Tick = u64;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the simulation core.
pub fn init() {
    profiling::init();
    log::info!("presentsim core v{} initialized", VERSION);
}
