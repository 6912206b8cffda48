//! Deterministic random number generation with forking.
//!
//! Every source of randomness (deck shuffles, random steals, determinization
//! resampling, playout choices) draws from a `GameRng` handed in by the
//! caller. There is no global generator.
//!
//! ```
//! use kitten_ismcts::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.gen_range_usize(0..100), b.gen_range_usize(0..100));
//!
//! // Forks are deterministic too
//! assert_eq!(a.fork().seed(), b.fork().seed());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// ChaCha8-backed RNG that can spawn independent child streams.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive a child stream. The n-th fork of a given seed is always the same.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        Self::new(Self::child_seed(self.seed, self.fork_counter))
    }

    /// Seed of the `index`-th child of `seed`, without touching any stream.
    ///
    /// Lets parallel workers derive the same per-sample seeds a sequential
    /// loop of `fork()` calls would.
    #[must_use]
    pub fn child_seed(seed: u64, index: u64) -> u64 {
        seed.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Independent stream for a named purpose (e.g. "deal", "playout").
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Uniform integer in `low..=high`.
    pub fn gen_inclusive(&mut self, low: usize, high: usize) -> usize {
        self.inner.gen_range(low..=high)
    }

    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Pick an index with probability proportional to `weights`.
    ///
    /// Returns `None` if weights are empty or sum to zero.
    pub fn choose_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().sum();
        if weights.is_empty() || total <= 0.0 {
            return None;
        }

        weighted_index(weights, self.inner.gen::<f64>() * total)
    }
}

/// Index whose cumulative weight range contains `threshold`, a value in
/// `0.0..total`. Zero weights own an empty range and are never picked.
fn weighted_index(weights: &[f64], mut threshold: f64) -> Option<usize> {
    for (i, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        threshold -= weight;
        if threshold < 0.0 {
            return Some(i);
        }
    }

    // Floating point edge case
    weights.iter().rposition(|&w| w > 0.0)
}
