use std::collections::VecDeque;

use rand::RngCore;

use super::Cost;
use crate::Tick;
use crate::buffers::BufferPool;
use crate::jitter::Jitter;
use crate::swapchain::SwapchainPool;
use crate::work::{CpuWork, GpuWork};

/// Single serial GPU queue.
///
/// At most one job is in flight. A job is started only once its CPU work has
/// finished (`now >= cpu.finish()`), but is observed as complete one tick
/// early (`now + 1 >= finish()`): a job started at `T` with duration `D` is
/// handed to presentation while stepping tick `T + D - 1`. The two checks
/// run as separate steps so a job never starts and completes in the same
/// tick unless its duration is 0 or 1.
#[derive(Debug, Clone, Default)]
pub struct GpuStage {
    in_flight: Option<GpuWork>,
}

impl GpuStage {
    /// Create an idle GPU stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the oldest pending frame if the GPU is idle, the frame's CPU work
    /// is done and a swapchain image is available.
    pub fn try_start<R: RngCore>(
        &mut self,
        now: Tick,
        cost: Cost,
        pending: &mut VecDeque<CpuWork>,
        swapchains: &mut SwapchainPool,
        jitter: &mut Jitter<R>,
    ) -> Option<GpuWork> {
        if self.in_flight.is_some() || swapchains.is_empty() {
            return None;
        }
        if now < pending.front()?.finish() {
            return None;
        }

        let swapchain = swapchains.acquire().ok()?;
        let cpu = pending.pop_front()?;
        let work = GpuWork {
            cpu,
            start: now,
            duration: jitter.sample(cost.nominal, cost.variance),
            swapchain,
        };
        self.in_flight = Some(work);

        log::trace!(
            "t={}: GPU started buffer {} into swapchain {} (duration {})",
            now,
            cpu.buffer,
            swapchain,
            work.duration
        );

        Some(work)
    }

    /// Retire the in-flight job if it is observed as finished.
    ///
    /// Signals the job's buffer fence and queues the image for presentation.
    pub fn complete(
        &mut self,
        now: Tick,
        buffers: &mut BufferPool,
        ready: &mut VecDeque<GpuWork>,
    ) -> Option<GpuWork> {
        let work = self.in_flight.take_if(|work| now + 1 >= work.finish())?;

        buffers.release(work.cpu.buffer);
        ready.push_back(work);

        log::trace!(
            "t={}: GPU finished swapchain {}, buffer {} released",
            now,
            work.swapchain,
            work.cpu.buffer
        );

        Some(work)
    }

    /// The job currently executing, if any.
    pub fn in_flight(&self) -> Option<&GpuWork> {
        self.in_flight.as_ref()
    }

    /// Check whether a job is executing.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }
}
