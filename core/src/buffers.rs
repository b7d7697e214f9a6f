//! CPU-writable render buffers and their fences.
//!
//! Each buffer is guarded by a binary fence. A signaled fence means the GPU
//! has finished with the buffer and the CPU may record into it again; an
//! unsignaled fence means work recorded into the buffer is still queued or
//! executing.

/// Status of a buffer fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceStatus {
    /// The buffer is in use by queued or in-flight work.
    Unsignaled,
    /// The buffer is free for the CPU to write into.
    Signaled,
}

/// Fixed-size pool of fenced buffers, indexed `0..len()`.
///
/// All buffers start free. Indexing past the end of the pool panics.
#[derive(Debug, Clone)]
pub struct BufferPool {
    fences: Vec<FenceStatus>,
}

impl BufferPool {
    /// Create a pool of `count` free buffers.
    ///
    /// # Panics
    ///
    /// Panics if `count` is 0.
    pub fn new(count: usize) -> Self {
        assert!(count > 0, "buffer pool needs at least one buffer");

        Self {
            fences: vec![FenceStatus::Signaled; count],
        }
    }

    /// Number of buffers in the pool.
    pub fn len(&self) -> usize {
        self.fences.len()
    }

    /// Always `false`; a pool holds at least one buffer.
    pub fn is_empty(&self) -> bool {
        self.fences.is_empty()
    }

    /// Fence status of buffer `index`.
    pub fn status(&self, index: usize) -> FenceStatus {
        self.fences[index]
    }

    /// Check whether the CPU may write into buffer `index`.
    pub fn is_free(&self, index: usize) -> bool {
        self.status(index) == FenceStatus::Signaled
    }

    /// Mark buffer `index` as in use.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is already in use.
    pub fn acquire(&mut self, index: usize) {
        assert!(self.is_free(index), "buffer {index} acquired while in use");
        self.fences[index] = FenceStatus::Unsignaled;
    }

    /// Signal the fence of buffer `index`, handing it back to the CPU.
    pub fn release(&mut self, index: usize) {
        self.fences[index] = FenceStatus::Signaled;
    }

    /// Number of buffers currently free.
    pub fn free_count(&self) -> usize {
        self.fences
            .iter()
            .filter(|&&status| status == FenceStatus::Signaled)
            .count()
    }
}
