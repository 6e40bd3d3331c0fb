//! Deterministic random number generation for deck shuffling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Portable shuffle**: The shuffle is defined here, not by `rand`, so a
//!   seed maps to the same deck order on every platform and `rand` release
//! - **Serializable**: O(1) state capture and restore
//!
//! ## Generator
//!
//! ChaCha8, seeded with `ChaCha8Rng::seed_from_u64(seed)`. Each draw used by
//! the shuffle is one `next_u32()` word.
//!
//! ```
//! use hanabi_core::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut xs: Vec<u32> = (0..10).collect();
//! let mut ys = xs.clone();
//! a.portable_shuffle(&mut xs);
//! b.portable_shuffle(&mut ys);
//! assert_eq!(xs, ys);
//! ```

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seed used by a freshly constructed server.
pub const DEFAULT_SEED: u64 = 0;

/// Deterministic RNG backing deck shuffles.
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

    /// The seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next raw 32-bit word.
    pub fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    /// Forward Fisher-Yates variant with a fixed index formula.
    ///
    /// For `i` in `0..len`, swaps element `i` with element
    /// `next_u32() % (i + 1)`. The modulo bias is accepted: the formula
    /// itself is what makes shuffles reproducible across implementations.
    pub fn portable_shuffle<T>(&mut self, slice: &mut [T]) {
        for i in 0..slice.len() {
            let j = (self.next_u32() % (i as u32 + 1)) as usize;
            if j != i {
                slice.swap(i, j);
            }
        }
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
