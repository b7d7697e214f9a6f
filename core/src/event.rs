//! Outcomes of vblank checks.

use crate::Tick;
use crate::swapchain::SwapchainIndex;

/// A frame that replaced the image on screen at a vblank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentedFrame {
    /// Vblank tick the frame was presented at.
    pub tick: Tick,
    /// Tick the CPU started recording the frame.
    pub cpu_start: Tick,
    /// Presentation tick minus CPU start tick.
    pub lag: Tick,
    /// Ticks between this frame's CPU submission and the previous one.
    pub frame_time: Tick,
    /// Swapchain image now on screen.
    pub swapchain: SwapchainIndex,
    /// Whether the frame counted towards statistics (past warm-up).
    pub sampled: bool,
}

impl PresentedFrame {
    /// Instantaneous frames per second implied by `frame_time`.
    pub fn fps(&self) -> f32 {
        1000.0 / self.frame_time as f32
    }
}

/// Result of one vblank check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VblankEvent {
    /// A new frame was presented.
    Presented(PresentedFrame),
    /// No frame was ready; the previous image stays on screen.
    Missed {
        /// Vblank tick that was missed.
        tick: Tick,
    },
}

impl VblankEvent {
    /// Tick of the vblank.
    pub fn tick(&self) -> Tick {
        match self {
            Self::Presented(frame) => frame.tick,
            Self::Missed { tick } => *tick,
        }
    }

    /// Check whether this vblank presented a frame.
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Presented(_))
    }
}
