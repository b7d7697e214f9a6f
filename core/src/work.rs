//! Units of work moving through the pipeline.

use crate::Tick;
use crate::swapchain::SwapchainIndex;

/// Frame recorded by the CPU into one buffer, waiting for the GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuWork {
    /// Buffer the frame was recorded into.
    pub buffer: usize,
    /// Tick the CPU started recording.
    pub start: Tick,
    /// Jittered recording cost.
    pub duration: Tick,
    /// Ticks since the previous submission, at least 1.
    pub ticks_since_last: Tick,
}

impl CpuWork {
    /// Tick from which the GPU may consume this frame.
    pub fn finish(&self) -> Tick {
        self.start + self.duration
    }
}

/// Frame executed by the GPU into a swapchain image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuWork {
    /// The CPU submission this work was built from.
    pub cpu: CpuWork,
    /// Tick the GPU started executing.
    pub start: Tick,
    /// Jittered execution cost.
    pub duration: Tick,
    /// Swapchain image being rendered to.
    pub swapchain: SwapchainIndex,
}

impl GpuWork {
    /// Placeholder for the image on screen before the first frame is presented.
    pub fn initial(swapchain: SwapchainIndex) -> Self {
        Self {
            cpu: CpuWork {
                buffer: 0,
                start: 0,
                duration: 0,
                ticks_since_last: 0,
            },
            start: 0,
            duration: 0,
            swapchain,
        }
    }

    /// Tick at which the rendered image is complete.
    pub fn finish(&self) -> Tick {
        self.start + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_ticks() {
        let cpu = CpuWork {
            buffer: 1,
            start: 10,
            duration: 7,
            ticks_since_last: 7,
        };
        assert_eq!(cpu.finish(), 17);

        let gpu = GpuWork {
            cpu,
            start: 17,
            duration: 16,
            swapchain: 2,
        };
        assert_eq!(gpu.finish(), 33);
    }

    #[test]
    fn test_initial_finishes_at_zero() {
        let initial = GpuWork::initial(3);
        assert_eq!(initial.finish(), 0);
        assert_eq!(initial.swapchain, 3);
    }
}
