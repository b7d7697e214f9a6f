//! Swapchain image rotation.
//!
//! A swapchain of `N` images keeps exactly one image locked on screen. The
//! remaining images are either queued for the GPU, executing, waiting for a
//! vblank, or sitting in the [`SwapchainPool`] ready to be acquired:
//!
//! ```text
//!            acquire()                complete              vblank hit
//! [pool] ──────────────► [in flight] ─────────► [ready] ─────────────► [locked]
//!    ▲                                                                    │
//!    └──────────────────────────── release() ─────────────────────────────┘
//! ```
//!
//! The pool therefore never holds more than `N - 1` images.

use std::collections::VecDeque;

use crate::error::PoolError;

/// Identifier of a swapchain image, `0..swapchain_count`.
pub type SwapchainIndex = usize;

/// FIFO of swapchain images that are neither locked nor in use.
#[derive(Debug, Clone)]
pub struct SwapchainPool {
    available: VecDeque<SwapchainIndex>,
    capacity: usize,
}

impl SwapchainPool {
    /// Create the pool for a swapchain of `swapchain_count` images.
    ///
    /// Images `0..swapchain_count - 1` start available; the last image is
    /// the one initially locked on screen.
    ///
    /// # Panics
    ///
    /// Panics if `swapchain_count` is less than 2.
    pub fn new(swapchain_count: usize) -> Self {
        assert!(
            swapchain_count >= 2,
            "swapchain needs at least two images"
        );

        let capacity = swapchain_count - 1;
        Self {
            available: (0..capacity).collect(),
            capacity,
        }
    }

    /// Index of the image locked on screen before the first vblank.
    pub fn initial_locked(&self) -> SwapchainIndex {
        self.capacity
    }

    /// Take the oldest available image.
    pub fn acquire(&mut self) -> Result<SwapchainIndex, PoolError> {
        self.available.pop_front().ok_or(PoolError::EmptyPool)
    }

    /// Return an image to the back of the queue.
    ///
    /// # Panics
    ///
    /// Panics if the pool is already full, which means an image was released
    /// twice.
    pub fn release(&mut self, index: SwapchainIndex) {
        self.available.push_back(index);
        assert!(
            self.available.len() <= self.capacity,
            "swapchain pool overflow: {} images available, capacity {}",
            self.available.len(),
            self.capacity
        );
    }

    /// Number of available images.
    pub fn len(&self) -> usize {
        self.available.len()
    }

    /// Check whether no image can be acquired.
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// Maximum number of images the pool can hold (`swapchain_count - 1`).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate available images in acquisition order.
    pub fn iter(&self) -> impl Iterator<Item = SwapchainIndex> + '_ {
        self.available.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let pool = SwapchainPool::new(4);
        assert_eq!(pool.capacity(), 3);
        assert_eq!(pool.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(pool.initial_locked(), 3);
    }

    #[test]
    fn test_fifo_order() {
        let mut pool = SwapchainPool::new(3);
        assert_eq!(pool.acquire(), Ok(0));
        pool.release(2);
        assert_eq!(pool.acquire(), Ok(1));
        assert_eq!(pool.acquire(), Ok(2));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_acquire_empty() {
        let mut pool = SwapchainPool::new(2);
        assert_eq!(pool.acquire(), Ok(0));
        assert_eq!(pool.acquire(), Err(PoolError::EmptyPool));
    }

    #[test]
    #[should_panic(expected = "swapchain pool overflow")]
    fn test_release_overflow_panics() {
        let mut pool = SwapchainPool::new(2);
        pool.release(1);
    }

    #[test]
    #[should_panic(expected = "swapchain needs at least two images")]
    fn test_single_image_panics() {
        SwapchainPool::new(1);
    }
}
