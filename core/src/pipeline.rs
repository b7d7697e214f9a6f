//! Tick driver for the presentation pipeline.
//!
//! [`Simulation`] owns every piece of pipeline state for one scenario and
//! advances it one tick at a time. Nothing is shared between simulations, so
//! several can run side by side in one process.
//!
//! # Pipeline Overview
//!
//! ```text
//! ┌──────────┐  CpuWork   ┌──────────────┐  GpuWork   ┌─────────────────┐
//! │ CpuStage │ ─────────► │   GpuStage   │ ─────────► │    Presenter    │
//! │          │  pending   │ (1 in flight)│   ready    │ (once per vblank│
//! └────▲─────┘   queue    └──────┬───────┘   queue    └────────┬────────┘
//!      │                         │                             │
//!      │   fence signaled        │ acquire image               │ release previous
//!      └──── BufferPool ◄────────┘       SwapchainPool ◄───────┘ locked image
//! ```
//!
//! # Per-Tick Order
//!
//! Every tick runs the same five steps in a fixed order:
//!
//! | Step | Stage | Runs |
//! |------|-------|------|
//! | 1 | Presentation check | vblank ticks only, never tick 0 |
//! | 2 | CPU submission attempt | every tick |
//! | 3 | CPU busy countdown | every tick |
//! | 4 | GPU start attempt | every tick |
//! | 5 | GPU completion check | every tick |
//!
//! Presentation runs first so a vblank only sees work completed on earlier
//! ticks. GPU start and completion are separate steps.
//!
//! # Example
//!
//! ```
//! use presentsim_core::config::SimConfig;
//! use presentsim_core::pipeline::Simulation;
//!
//! let config = SimConfig::default().with_num_ticks(200);
//! let report = Simulation::new(config).unwrap().run();
//!
//! assert_eq!(report.events.len(), 12); // vblanks at 16, 32, ..., 192
//! assert_eq!(report.summary.hits + report.summary.misses, 12);
//! ```

use std::collections::VecDeque;
use std::fmt;

use rand::RngCore;
use rand::rngs::StdRng;

use crate::Tick;
use crate::buffers::BufferPool;
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::event::VblankEvent;
use crate::jitter::Jitter;
use crate::stages::{Cost, CpuStage, GpuStage, Presenter};
use crate::stats::{StatsCollector, Summary};
use crate::swapchain::{SwapchainIndex, SwapchainPool};
use crate::work::{CpuWork, GpuWork};

/// A broken pipeline invariant, found by [`Simulation::check_invariants`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// More frames pending than there are buffers.
    PendingOverflow {
        /// Frames waiting for the GPU.
        len: usize,
        /// Number of CPU buffers.
        capacity: usize,
    },
    /// More images available than `swapchain_count - 1`.
    PoolOverflow {
        /// Images in the available pool.
        len: usize,
        /// `swapchain_count - 1`.
        capacity: usize,
    },
    /// A swapchain image index outside `0..swapchain_count`.
    SwapchainOutOfRange(SwapchainIndex),
    /// A swapchain image held in more than one place.
    SwapchainDuplicated(SwapchainIndex),
    /// A swapchain image held nowhere.
    SwapchainMissing(SwapchainIndex),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PendingOverflow { len, capacity } => {
                write!(f, "{len} frames pending for {capacity} buffers")
            }
            Self::PoolOverflow { len, capacity } => {
                write!(f, "{len} swapchain images available, capacity {capacity}")
            }
            Self::SwapchainOutOfRange(index) => write!(f, "swapchain {index} out of range"),
            Self::SwapchainDuplicated(index) => write!(f, "swapchain {index} held twice"),
            Self::SwapchainMissing(index) => write!(f, "swapchain {index} lost"),
        }
    }
}

/// Everything produced by a complete run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// One event per vblank, in tick order.
    pub events: Vec<VblankEvent>,
    /// End-of-run statistics.
    pub summary: Summary,
}

/// One scenario of the presentation pipeline.
///
/// # Thread Safety
///
/// `Simulation` is a plain value with no interior mutability. It is `Send`
/// when its generator is, and independent simulations never interact.
#[derive(Debug, Clone)]
pub struct Simulation<R = StdRng> {
    config: SimConfig,
    tick: Tick,
    jitter: Jitter<R>,

    buffers: BufferPool,
    swapchains: SwapchainPool,
    pending: VecDeque<CpuWork>,
    ready: VecDeque<GpuWork>,

    cpu: CpuStage,
    gpu: GpuStage,
    presenter: Presenter,
    stats: StatsCollector,
}

impl Simulation<StdRng> {
    /// Create a simulation using the default fixed seed.
    ///
    /// The configuration is validated, then clamped with
    /// [`SimConfig::normalized`].
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        Self::with_jitter(config, Jitter::default())
    }
}

impl<R: RngCore> Simulation<R> {
    /// Create a simulation drawing durations from `jitter`.
    pub fn with_jitter(config: SimConfig, jitter: Jitter<R>) -> Result<Self, ConfigError> {
        config.validate()?;
        let config = config.normalized();

        let buffers = BufferPool::new(config.buffer_count);
        let swapchains = SwapchainPool::new(config.swapchain_count);
        let presenter = Presenter::new(&swapchains);

        log::debug!("Simulation created: {:?}", config);

        Ok(Self {
            config,
            tick: 0,
            jitter,
            buffers,
            swapchains,
            pending: VecDeque::with_capacity(config.buffer_count),
            ready: VecDeque::with_capacity(config.swapchain_count),
            cpu: CpuStage::new(),
            gpu: GpuStage::new(),
            presenter,
            stats: StatsCollector::new(),
        })
    }

    /// Advance the pipeline by one tick.
    ///
    /// Returns the vblank outcome if this tick was a vblank.
    ///
    /// # Panics
    ///
    /// Panics if the run is already finished, or if a capacity invariant
    /// breaks while stepping.
    pub fn step(&mut self) -> Option<VblankEvent> {
        crate::profile_function!();
        assert!(
            !self.is_finished(),
            "simulation already ran all {} ticks",
            self.config.num_ticks
        );

        let now = self.tick;
        let event = (now != 0 && now % self.config.vblank_interval == 0).then(|| {
            self.presenter.on_vblank(
                now,
                &mut self.ready,
                &mut self.swapchains,
                &mut self.stats,
            )
        });

        self.cpu.try_submit(
            now,
            Cost::new(self.config.cpu_time, self.config.cpu_time_variance),
            &mut self.buffers,
            &mut self.pending,
            &mut self.jitter,
        );
        self.cpu.tick_busy();

        self.gpu.try_start(
            now,
            Cost::new(self.config.gpu_time, self.config.gpu_time_variance),
            &mut self.pending,
            &mut self.swapchains,
            &mut self.jitter,
        );
        self.gpu.complete(now, &mut self.buffers, &mut self.ready);

        #[cfg(debug_assertions)]
        if let Some(violation) = self.check_invariants() {
            panic!("pipeline invariant violated at t={now}: {violation}");
        }

        self.tick += 1;
        event
    }

    /// Run the remaining ticks, handing each vblank event to `on_event`.
    pub fn run_with(&mut self, mut on_event: impl FnMut(&VblankEvent)) -> Summary {
        while !self.is_finished() {
            if let Some(event) = self.step() {
                on_event(&event);
            }
        }

        log::debug!(
            "Simulation finished after {} ticks: {} hits, {} misses",
            self.tick,
            self.presenter.hits(),
            self.presenter.misses()
        );

        self.summary()
    }

    /// Run the remaining ticks and collect every event.
    pub fn run(mut self) -> RunReport {
        let mut events = Vec::new();
        let summary = self.run_with(|event| events.push(*event));
        RunReport { events, summary }
    }

    /// Statistics gathered so far.
    pub fn summary(&self) -> Summary {
        Summary {
            hits: self.presenter.hits(),
            misses: self.presenter.misses(),
            frame_time: self.stats.frame_time_stats(),
            lag: self.stats.lag_stats(),
        }
    }

    /// Check the capacity and swapchain exclusivity invariants.
    ///
    /// Returns the first violation found. The locked image, the available
    /// images, the in-flight image and the ready images must together hold
    /// every swapchain index exactly once.
    pub fn check_invariants(&self) -> Option<InvariantViolation> {
        if self.pending.len() > self.buffers.len() {
            return Some(InvariantViolation::PendingOverflow {
                len: self.pending.len(),
                capacity: self.buffers.len(),
            });
        }
        if self.swapchains.len() > self.swapchains.capacity() {
            return Some(InvariantViolation::PoolOverflow {
                len: self.swapchains.len(),
                capacity: self.swapchains.capacity(),
            });
        }

        let mut held = vec![0u32; self.config.swapchain_count];
        let in_use = std::iter::once(self.presenter.locked().swapchain)
            .chain(self.swapchains.iter())
            .chain(self.gpu.in_flight().map(|work| work.swapchain))
            .chain(self.ready.iter().map(|work| work.swapchain));
        for index in in_use {
            let Some(count) = held.get_mut(index) else {
                return Some(InvariantViolation::SwapchainOutOfRange(index));
            };
            *count += 1;
            if *count > 1 {
                return Some(InvariantViolation::SwapchainDuplicated(index));
            }
        }

        held.iter()
            .position(|&count| count == 0)
            .map(InvariantViolation::SwapchainMissing)
    }

    /// Check whether every configured tick has run.
    pub fn is_finished(&self) -> bool {
        self.tick >= self.config.num_ticks
    }

    /// Next tick to be simulated.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// The normalized configuration in use.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// CPU work waiting for the GPU, oldest first.
    pub fn pending_gpu_work(&self) -> &VecDeque<CpuWork> {
        &self.pending
    }

    /// Swapchain images free for the GPU.
    pub fn available_swapchains(&self) -> &SwapchainPool {
        &self.swapchains
    }

    /// Image currently on screen.
    pub fn locked_swapchain(&self) -> &GpuWork {
        self.presenter.locked()
    }

    /// GPU job currently executing.
    pub fn in_flight(&self) -> Option<&GpuWork> {
        self.gpu.in_flight()
    }

    /// Completed frames waiting for a vblank, oldest first.
    pub fn ready_to_present(&self) -> &VecDeque<GpuWork> {
        &self.ready
    }

    /// Buffer fences.
    pub fn buffers(&self) -> &BufferPool {
        &self.buffers
    }

    /// Samples recorded so far.
    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }
}
