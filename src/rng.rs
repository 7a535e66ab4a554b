//! Random number sources for sampling.
//!
//! The reservoir only needs one capability, a uniform draw from `[0, n)`.
//! Any `rand` generator provides it; tests can plug in scripted sources.

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};

/// Source of uniformly distributed integers in a half-open range.
pub trait RandomRange {
    /// Return a value uniformly distributed in `[0, n)`. `n` is never zero.
    fn below(&mut self, n: u64) -> u64;
}

impl<R: Rng> RandomRange for R {
    fn below(&mut self, n: u64) -> u64 {
        self.gen_range(0..n)
    }
}

/// Pick the seed for a run: the caller's, or a fresh one from the OS CSPRNG.
pub fn resolve_seed(seed: Option<i64>) -> i64 {
    seed.unwrap_or_else(|| OsRng.next_u64() as i64)
}

/// Deterministic generator for a given seed.
///
/// Negative seeds are valid; the bits are reinterpreted as unsigned.
pub fn seeded(seed: i64) -> StdRng {
    StdRng::seed_from_u64(seed as u64)
}
