//! Deterministic random number generation for shuffling.
//!
//! Each game owns one `GameRng`. Production games seed from OS entropy;
//! tests pass a fixed seed and get identical shuffles every run.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Per-game RNG.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality
/// randomness. The seed is retained so a game's shuffle history can be
/// reproduced from its log line.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }
}
