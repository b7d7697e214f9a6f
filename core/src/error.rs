//! Simulation error types.

use std::fmt;

/// Errors raised while validating a [`SimConfig`](crate::config::SimConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `vblank_interval` was zero, which would make the vblank check divide by zero.
    ZeroVblankInterval,
    /// A jitter bound is too large for the bounded random generator.
    VarianceTooLarge {
        /// Name of the offending option.
        option: &'static str,
        /// The rejected value.
        value: u64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroVblankInterval => write!(f, "vblank_interval must be greater than zero"),
            Self::VarianceTooLarge { option, value } => write!(
                f,
                "{option} = {value} exceeds the maximum jitter bound of {}",
                crate::jitter::MAX_VARIANCE
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised by the swapchain pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// No swapchain image is available for acquisition.
    EmptyPool,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPool => write!(f, "no swapchain image available"),
        }
    }
}

impl std::error::Error for PoolError {}
