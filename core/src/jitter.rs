//! Deterministic duration jitter.
//!
//! [`Jitter`] perturbs a nominal duration by a value drawn uniformly from
//! `[-variance, +variance]` and clamps the result at zero. Draws use rejection
//! sampling against the generator's full 32-bit range so every offset is
//! equally likely.
//!
//! The generator is owned by the jitter model rather than living in a global,
//! so two simulations never share a random stream.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::Tick;

/// Seed used by [`Jitter::default`] so identical scenarios replay identically.
pub const DEFAULT_SEED: u64 = 101;

/// Largest jitter bound whose draw range `2 * variance + 1` fits in a `u32`.
pub const MAX_VARIANCE: Tick = ((u32::MAX - 1) / 2) as Tick;

/// Return a uniformly distributed value in `[0, bound)`.
///
/// Raw draws below `2^32 mod bound` are rejected so the final modulo is
/// unbiased. A `bound` of zero yields zero without touching the generator.
pub fn bounded_rand<R: RngCore + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    if bound == 0 {
        return 0;
    }

    let threshold = bound.wrapping_neg() % bound;
    loop {
        let r = rng.next_u32();
        if r >= threshold {
            return r % bound;
        }
    }
}

/// Seeded source of jittered durations.
#[derive(Debug, Clone)]
pub struct Jitter<R = StdRng> {
    rng: R,
}

impl Jitter<StdRng> {
    /// Create a jitter model seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for Jitter<StdRng> {
    fn default() -> Self {
        Self::from_seed(DEFAULT_SEED)
    }
}

impl<R: RngCore> Jitter<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw `base + u` with `u` uniform in `[-variance, +variance]`, clamped at zero.
    ///
    /// # Panics
    ///
    /// Panics if `variance` exceeds [`MAX_VARIANCE`]. Configurations are
    /// validated against that bound before a simulation starts.
    pub fn sample(&mut self, base: Tick, variance: Tick) -> Tick {
        assert!(
            variance <= MAX_VARIANCE,
            "jitter variance {variance} exceeds {MAX_VARIANCE}"
        );

        let bound = (variance * 2 + 1) as u32;
        let offset = Tick::from(bounded_rand(&mut self.rng, bound));
        base.saturating_add(offset).saturating_sub(variance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Generator that replays a fixed list of raw draws.
    struct Scripted {
        values: Vec<u32>,
        next: usize,
    }

    impl Scripted {
        fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                next: 0,
            }
        }
    }

    impl RngCore for Scripted {
        fn next_u32(&mut self) -> u32 {
            let value = self.values[self.next % self.values.len()];
            self.next += 1;
            value
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_zero_variance_is_exact() {
        let mut jitter = Jitter::default();
        for base in [0, 1, 7, 17, 1000] {
            assert_eq!(jitter.sample(base, 0), base);
        }
    }

    #[test]
    fn test_samples_stay_in_range() {
        let mut jitter = Jitter::default();
        for _ in 0..10_000 {
            let value = jitter.sample(17, 2);
            assert!((15..=19).contains(&value), "sample {value} out of range");
        }
    }

    #[test]
    fn test_clamped_at_zero() {
        // bound = 7, 7 % 7 = 0 maps to an offset of -variance.
        let mut jitter = Jitter::new(Scripted::new(&[7]));
        assert_eq!(jitter.sample(1, 3), 0);
    }

    #[test]
    fn test_scripted_offsets() {
        // bound = 5, threshold = 2^32 mod 5 = 1
        let mut jitter = Jitter::new(Scripted::new(&[2, 4, 5, 6]));
        assert_eq!(jitter.sample(10, 2), 10);
        assert_eq!(jitter.sample(10, 2), 12);
        assert_eq!(jitter.sample(10, 2), 8);
        assert_eq!(jitter.sample(10, 2), 9);
    }

    #[test]
    fn test_rejects_below_threshold() {
        // bound = 3, threshold = 2^32 mod 3 = 1, so 0 is rejected.
        let mut rng = Scripted::new(&[0, 0, 7]);
        assert_eq!(bounded_rand(&mut rng, 3), 1);
        assert_eq!(rng.next, 3);
    }

    #[test]
    fn test_zero_bound() {
        let mut rng = Scripted::new(&[9]);
        assert_eq!(bounded_rand(&mut rng, 0), 0);
        assert_eq!(rng.next, 0);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Jitter::from_seed(7);
        let mut b = Jitter::from_seed(7);
        for _ in 0..256 {
            assert_eq!(a.sample(17, 4), b.sample(17, 4));
        }
    }

    #[test]
    fn test_offsets_cover_interval() {
        let mut jitter = Jitter::default();
        let mut seen = [false; 5];
        for _ in 0..1_000 {
            seen[(jitter.sample(10, 2) - 8) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn test_oversized_variance_panics() {
        Jitter::default().sample(0, MAX_VARIANCE + 1);
    }
}
