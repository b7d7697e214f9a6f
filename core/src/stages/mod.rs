//! Pipeline stages stepped by the [`Simulation`](crate::pipeline::Simulation).
//!
//! | Stage | Consumes | Produces |
//! |-------|----------|----------|
//! | [`CpuStage`] | a free buffer | [`CpuWork`](crate::work::CpuWork) in the pending queue |
//! | [`GpuStage`] | pending work + a swapchain image | [`GpuWork`](crate::work::GpuWork) in the ready queue |
//! | [`Presenter`] | ready work at a vblank | a [`VblankEvent`](crate::event::VblankEvent) |
//!
//! Stages own only their private counters. Queues and pools are owned by the
//! simulation and lent to each stage for the duration of a call.

mod cpu;
mod gpu;
mod present;

pub use cpu::CpuStage;
pub use gpu::GpuStage;
pub use present::Presenter;

use crate::Tick;

/// Nominal cost of a stage and its symmetric jitter bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cost {
    /// Cost without jitter.
    pub nominal: Tick,
    /// Maximum deviation in either direction.
    pub variance: Tick,
}

impl Cost {
    /// Create a cost.
    pub fn new(nominal: Tick, variance: Tick) -> Self {
        Self { nominal, variance }
    }
}
