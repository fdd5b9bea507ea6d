//! Random sources
//!
//! Simulated backend outcomes draw from a [`RandomSource`] owned by the
//! caller, so tests can replay a fixed sequence.

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Source of uniformly distributed indexes.
pub trait RandomSource {
    /// Returns a value in `0..bound`. Returns zero when `bound` is zero.
    fn next_below(&mut self, bound: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

/// Non-cryptographic generator backed by [`SmallRng`].
#[derive(Debug, Clone)]
pub struct SmallRngSource {
    rng: SmallRng,
}

impl SmallRngSource {
    /// Seed from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Seed from a fixed value, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SmallRngSource {
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }

        self.rng.random_range(0..bound)
    }
}

/// Replays a fixed list of values, cycling when it runs out.
///
/// Each value is reduced modulo the requested bound.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<u32>,
    position: usize,
}

impl SequenceSource {
    /// Create a source replaying `values`. An empty list always yields zero.
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            position: 0,
        }
    }
}

impl RandomSource for SequenceSource {
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 || self.values.is_empty() {
            return 0;
        }

        let value = self.values.get(self.position).copied().unwrap_or_default();

        self.position = (self.position + 1) % self.values.len();

        value % bound
    }
}
