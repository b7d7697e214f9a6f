//! Scenario configuration.
//!
//! [`SimConfig`] holds every tunable of a single simulation run. Values are
//! taken as given and only brought into range by [`SimConfig::normalized`],
//! which applies the documented clamps:
//!
//! | option | bound |
//! |--------|-------|
//! | `buffer_count` | clamped to `[1, MAX_BUFFERS]` |
//! | `swapchain_count` | at least `MIN_SWAPCHAINS` |
//!
//! Everything else is left unclamped. A zero `vblank_interval` is rejected by
//! [`SimConfig::validate`].

use crate::Tick;
use crate::error::ConfigError;
use crate::jitter::MAX_VARIANCE;

/// Upper bound on the number of CPU-writable buffers.
pub const MAX_BUFFERS: usize = 16;

/// Lower bound on the number of swapchain images (one locked, one in rotation).
pub const MIN_SWAPCHAINS: usize = 2;

/// Parameters of one simulated scenario.
///
/// # Example
///
/// ```
/// use presentsim_core::config::SimConfig;
///
/// let config = SimConfig::default()
///     .with_buffer_count(2)
///     .with_vblank_interval(8);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.buffer_count, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Ticks between presentation opportunities.
    pub vblank_interval: Tick,
    /// Number of CPU-writable buffers.
    pub buffer_count: usize,
    /// Number of swapchain images.
    pub swapchain_count: usize,
    /// Nominal CPU cost of one frame.
    pub cpu_time: Tick,
    /// Symmetric jitter bound applied to the CPU cost.
    pub cpu_time_variance: Tick,
    /// Nominal GPU cost of one frame.
    pub gpu_time: Tick,
    /// Symmetric jitter bound applied to the GPU cost.
    pub gpu_time_variance: Tick,
    /// Total number of ticks to simulate.
    pub num_ticks: Tick,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            vblank_interval: 16,
            buffer_count: 3,
            swapchain_count: 4,
            cpu_time: 7,
            cpu_time_variance: 2,
            gpu_time: 17,
            gpu_time_variance: 2,
            num_ticks: 1000,
        }
    }
}

impl SimConfig {
    /// Set the vblank interval.
    pub fn with_vblank_interval(mut self, ticks: Tick) -> Self {
        self.vblank_interval = ticks;
        self
    }

    /// Set the number of CPU-writable buffers.
    pub fn with_buffer_count(mut self, count: usize) -> Self {
        self.buffer_count = count;
        self
    }

    /// Set the number of swapchain images.
    pub fn with_swapchain_count(mut self, count: usize) -> Self {
        self.swapchain_count = count;
        self
    }

    /// Set the nominal CPU cost and its jitter bound.
    pub fn with_cpu_time(mut self, time: Tick, variance: Tick) -> Self {
        self.cpu_time = time;
        self.cpu_time_variance = variance;
        self
    }

    /// Set the nominal GPU cost and its jitter bound.
    pub fn with_gpu_time(mut self, time: Tick, variance: Tick) -> Self {
        self.gpu_time = time;
        self.gpu_time_variance = variance;
        self
    }

    /// Set the number of ticks to simulate.
    pub fn with_num_ticks(mut self, ticks: Tick) -> Self {
        self.num_ticks = ticks;
        self
    }

    /// Check that the configuration can be simulated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vblank_interval == 0 {
            return Err(ConfigError::ZeroVblankInterval);
        }
        for (option, value) in [
            ("cpu_time_variance", self.cpu_time_variance),
            ("gpu_time_variance", self.gpu_time_variance),
        ] {
            if value > MAX_VARIANCE {
                return Err(ConfigError::VarianceTooLarge { option, value });
            }
        }
        Ok(())
    }

    /// Return a copy with the documented clamps applied.
    pub fn normalized(self) -> Self {
        let buffer_count = self.buffer_count.clamp(1, MAX_BUFFERS);
        if buffer_count != self.buffer_count {
            log::debug!(
                "buffer_count {} clamped to {}",
                self.buffer_count,
                buffer_count
            );
        }

        let swapchain_count = self.swapchain_count.max(MIN_SWAPCHAINS);
        if swapchain_count != self.swapchain_count {
            log::debug!(
                "swapchain_count {} raised to {}",
                self.swapchain_count,
                swapchain_count
            );
        }

        Self {
            buffer_count,
            swapchain_count,
            ..self
        }
    }
}
