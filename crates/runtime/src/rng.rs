//! Seeded PRNG behind the core's dice trait.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thornvale_core::CombatRng;

/// Combat dice backed by a seeded `StdRng`.
///
/// A fixed seed (from the settings file) makes whole battles reproducible;
/// without one the generator seeds from OS entropy.
pub struct SeededCombatRng(StdRng);

impl SeededCombatRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl CombatRng for SeededCombatRng {
    fn roll_range(&mut self, lo: u32, hi: u32) -> u32 {
        self.0.gen_range(lo..=hi)
    }

    fn one_in(&mut self, n: u32) -> bool {
        self.0.gen_ratio(1, n)
    }
}
