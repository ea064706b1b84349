//! Deterministic white noise generator.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::config::DEFAULT_NOISE_SEED;

const FACTOR: f64 = 377.0;

/// Multiplicative congruential generator on the unit interval.
///
/// Each step keeps the fractional part of `seed * 377`; the output is centred
/// to [-0.5, 0.5). The sequence depends only on the initial seed.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseSource {
    initial_seed: f64,
    seed: f64,
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SEED)
    }
}

impl NoiseSource {
    pub fn new(seed: f64) -> Self {
        Self {
            initial_seed: seed,
            seed,
        }
    }

    /// Restarts the sequence from the initial seed.
    pub fn reset(&mut self) {
        self.seed = self.initial_seed;
    }

    #[inline]
    pub fn next_sample(&mut self) -> f64 {
        let product = self.seed * FACTOR;
        self.seed = product - product.trunc();
        self.seed - 0.5
    }
}
