//! Deterministic input generation.
//!
//! Uses PCG (Permuted Congruential Generator) so that a seed fully determines
//! the generated sequence on every platform. Combined with deterministic step
//! sources, `(seed, size, algorithm)` identifies a run exactly.

use rand::prelude::*;
use rand_pcg::Pcg64;

use crate::engine::Value;

/// Seeded generator for visualizer input sequences.
#[derive(Debug, Clone)]
pub struct DataRng {
    /// Seed the generator was created from.
    seed: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl DataRng {
    /// Create a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Get the seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw one value uniformly from `[min, min + range)`.
    ///
    /// A zero `range` always yields `min`.
    pub fn gen_value(&mut self, min: Value, range: Value) -> Value {
        if range == 0 {
            return min;
        }
        min.saturating_add(self.rng.gen_range(0..range))
    }

    /// Generate `size` values uniformly from `[min, min + range)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sortviz::engine::rng::DataRng;
    ///
    /// let mut rng = DataRng::new(42);
    /// let data = rng.generate(10, 5, 400);
    /// assert_eq!(data.len(), 10);
    /// assert!(data.iter().all(|v| (5..405).contains(v)));
    /// ```
    #[must_use]
    pub fn generate(&mut self, size: usize, min: Value, range: Value) -> Vec<Value> {
        (0..size).map(|_| self.gen_value(min, range)).collect()
    }
}
