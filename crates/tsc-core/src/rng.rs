//! Deterministic simulation-level RNG.
//!
//! Randomized controllers each own a `SimRng` derived from the run's master
//! seed and their intersection's position in the controllable list:
//!
//!   seed = master_seed XOR (index * MIXING_CONSTANT)
//!
//! so adding intersections at the end of the list does not disturb the
//! streams of existing ones.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded `SmallRng` wrapper.  Single-threaded use only.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed deterministically from a master seed and a stream index.
    pub fn for_stream(master_seed: u64, index: usize) -> Self {
        let seed = master_seed ^ (index as u64).wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Uniform index in `0..n`.  Returns `None` when `n == 0`.
    #[inline]
    pub fn index(&mut self, n: usize) -> Option<usize> {
        (n > 0).then(|| self.0.gen_range(0..n))
    }
}
