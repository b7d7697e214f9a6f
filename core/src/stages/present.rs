use std::collections::VecDeque;

use crate::Tick;
use crate::event::{PresentedFrame, VblankEvent};
use crate::stats::{StatsCollector, WARMUP_FRAMES};
use crate::swapchain::SwapchainPool;
use crate::work::GpuWork;

/// Vblank handler: decides whether the display flips to a new image.
#[derive(Debug, Clone)]
pub struct Presenter {
    locked: GpuWork,
    hits: u64,
    misses: u64,
}

impl Presenter {
    /// Create a presenter showing the swapchain pool's initial image.
    pub fn new(swapchains: &SwapchainPool) -> Self {
        Self {
            locked: GpuWork::initial(swapchains.initial_locked()),
            hits: 0,
            misses: 0,
        }
    }

    /// Handle the vblank at `now`.
    ///
    /// Presents the oldest ready frame if it has finished by `now`, returning
    /// the previously locked image to `swapchains`. Frames presented after the
    /// warm-up period are recorded into `stats`.
    pub fn on_vblank(
        &mut self,
        now: Tick,
        ready: &mut VecDeque<GpuWork>,
        swapchains: &mut SwapchainPool,
        stats: &mut StatsCollector,
    ) -> VblankEvent {
        crate::profile_scope!("vblank");

        let work = match ready.front() {
            Some(&work) if now >= work.finish() => work,
            _ => {
                self.misses += 1;
                log::trace!("t={}: vblank missed", now);
                return VblankEvent::Missed { tick: now };
            }
        };
        ready.pop_front();

        swapchains.release(self.locked.swapchain);
        self.locked = work;

        let lag = now - work.cpu.start;
        let sampled = self.hits >= WARMUP_FRAMES;
        if sampled {
            stats.record(work.cpu.ticks_since_last, lag);
        }
        self.hits += 1;

        crate::profile_plot!("lag", lag);
        crate::frame_mark!();
        log::trace!(
            "t={}: presented swapchain {} (lag {})",
            now,
            work.swapchain,
            lag
        );

        VblankEvent::Presented(PresentedFrame {
            tick: now,
            cpu_start: work.cpu.start,
            lag,
            frame_time: work.cpu.ticks_since_last,
            swapchain: work.swapchain,
            sampled,
        })
    }

    /// Image currently on screen.
    pub fn locked(&self) -> &GpuWork {
        &self.locked
    }

    /// Vblanks that presented a new frame.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Vblanks that found nothing to present.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
