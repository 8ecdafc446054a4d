//! Randomness sources implementing [`RandomSource`].

use std::collections::VecDeque;

use hue_hunt_core::RandomSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic pseudo-random source seeded from a single integer.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Creates a source whose draws are fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed the source was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn uniform_int(&mut self, lo: u32, hi: u32) -> u32 {
        self.rng.gen_range(lo..hi)
    }

    fn uniform_real(&mut self, lo: f32, hi: f32) -> f32 {
        self.rng.gen_range(lo..hi)
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

/// Replays a fixed script of draws.
///
/// Integer draws, real draws and coin flips are taken from separate queues in
/// the order they were supplied. Running out of scripted values, or scripting
/// a value outside the requested range, panics.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    ints: VecDeque<u32>,
    reals: VecDeque<f32>,
    flips: VecDeque<bool>,
}

impl ScriptedRandom {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends integer draws to the script.
    #[must_use]
    pub fn with_ints(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.ints.extend(values);
        self
    }

    /// Appends real draws to the script.
    #[must_use]
    pub fn with_reals(mut self, values: impl IntoIterator<Item = f32>) -> Self {
        self.reals.extend(values);
        self
    }

    /// Appends coin flips to the script.
    #[must_use]
    pub fn with_flips(mut self, values: impl IntoIterator<Item = bool>) -> Self {
        self.flips.extend(values);
        self
    }

    /// Reports whether every scripted value was consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.ints.is_empty() && self.reals.is_empty() && self.flips.is_empty()
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform_int(&mut self, lo: u32, hi: u32) -> u32 {
        let value = self.ints.pop_front().expect("integer script exhausted");
        assert!(
            (lo..hi).contains(&value),
            "scripted integer {value} outside {lo}..{hi}"
        );
        value
    }

    fn uniform_real(&mut self, lo: f32, hi: f32) -> f32 {
        let value = self.reals.pop_front().expect("real script exhausted");
        assert!(
            (lo..hi).contains(&value),
            "scripted real {value} outside {lo}..{hi}"
        );
        value
    }

    fn coin_flip(&mut self) -> bool {
        self.flips.pop_front().expect("coin flip script exhausted")
    }
}
