use std::collections::VecDeque;

use rand::RngCore;

use super::Cost;
use crate::Tick;
use crate::buffers::BufferPool;
use crate::jitter::Jitter;
use crate::work::CpuWork;

/// CPU side of the pipeline: records one frame at a time into the buffer ring.
///
/// The CPU stays occupied for the *nominal* cost after each submission,
/// while the GPU may only consume the frame after its *jittered* duration.
#[derive(Debug, Clone, Default)]
pub struct CpuStage {
    /// Buffer the next frame will be recorded into.
    next_buffer: usize,
    /// Ticks of occupancy left before the next submission attempt.
    busy_ticks: Tick,
    /// Tick of the most recent submission.
    last_submission: Tick,
}

impl CpuStage {
    /// Create an idle CPU stage pointing at buffer 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame if the next buffer is free and the CPU is idle.
    ///
    /// Returns the submitted work, which has also been pushed onto `pending`.
    ///
    /// # Panics
    ///
    /// Panics if the pending queue would hold more frames than there are
    /// buffers.
    pub fn try_submit<R: RngCore>(
        &mut self,
        now: Tick,
        cost: Cost,
        buffers: &mut BufferPool,
        pending: &mut VecDeque<CpuWork>,
        jitter: &mut Jitter<R>,
    ) -> Option<CpuWork> {
        if self.busy_ticks != 0 || !buffers.is_free(self.next_buffer) {
            return None;
        }

        let work = CpuWork {
            buffer: self.next_buffer,
            start: now,
            duration: jitter.sample(cost.nominal, cost.variance),
            ticks_since_last: now.saturating_sub(self.last_submission).max(1),
        };
        self.last_submission = now;
        self.busy_ticks = cost.nominal;

        buffers.acquire(work.buffer);
        pending.push_back(work);
        assert!(
            pending.len() <= buffers.len(),
            "pending GPU work overflow: {} frames queued for {} buffers",
            pending.len(),
            buffers.len()
        );

        self.next_buffer = (self.next_buffer + 1) % buffers.len();

        log::trace!(
            "t={}: CPU submitted buffer {} (duration {})",
            now,
            work.buffer,
            work.duration
        );

        Some(work)
    }

    /// Burn one tick of CPU occupancy.
    pub fn tick_busy(&mut self) {
        self.busy_ticks = self.busy_ticks.saturating_sub(1);
    }

    /// Buffer the next frame will be recorded into.
    pub fn next_buffer(&self) -> usize {
        self.next_buffer
    }

    /// Remaining occupancy in ticks.
    pub fn busy_ticks(&self) -> Tick {
        self.busy_ticks
    }
}
