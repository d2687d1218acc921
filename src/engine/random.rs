//! Randomness sources for the roller.
//!
//! Rolls are for entertainment only. Neither source is provably fair;
//! `SeededSource` exists so that runs can be replayed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Anything that can hand out uniform draws in `[0, 1)`.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`.
    fn next(&mut self) -> f64;
}

/// OS-seeded generator used by the shell by default.
pub struct EntropySource {
    rng: StdRng,
}

impl EntropySource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropySource {
    fn next(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Deterministic generator; the same seed always yields the same draws.
pub struct SeededSource {
    seed: u64,
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn next(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Build the shell's source: seeded when a seed is configured.
pub fn source_from_seed(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededSource::new(seed)),
        None => Box::new(EntropySource::new()),
    }
}
