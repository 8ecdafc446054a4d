#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure round generation system for Hue Hunt.
//!
//! A round is built from a random base color, a lightness budget taken from
//! the difficulty curve, and a single odd cell placed uniformly at random.
//! Every random draw goes through the injected [`RandomSource`], so a seeded
//! or scripted source replays rounds exactly.

mod color;
mod random;

pub use color::{generate_base_color, perturb};
pub use random::{ScriptedRandom, SeededRandom};

use hue_hunt_core::{CellIndex, DifficultyLevel, RandomSource, Round, GRID_SIZE};
use hue_hunt_system_difficulty::delta_for_level;

/// Builds rounds for a square grid of a fixed size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundGenerator {
    cell_count: u32,
}

impl Default for RoundGenerator {
    fn default() -> Self {
        Self::new(GRID_SIZE)
    }
}

impl RoundGenerator {
    /// Creates a generator for grids `grid_size` cells wide.
    ///
    /// Panics when `grid_size` is zero.
    #[must_use]
    pub fn new(grid_size: u32) -> Self {
        assert!(grid_size > 0, "grid must contain at least one cell");
        Self {
            cell_count: grid_size * grid_size,
        }
    }

    /// Number of cells every generated round contains.
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.cell_count
    }

    /// Generates a fresh round for the provided level.
    pub fn generate<R: RandomSource + ?Sized>(&self, level: DifficultyLevel, rng: &mut R) -> Round {
        let base = generate_base_color(rng);
        let delta = delta_for_level(level);
        let odd = perturb(base, delta, rng);
        let target = CellIndex::new(rng.uniform_int(0, self.cell_count));
        Round::new(self.cell_count, base, odd, target, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_draws_place_the_target_exactly() {
        let mut rng = ScriptedRandom::new()
            .with_ints([200, 50, 45, 13])
            .with_flips([true]);
        let round = RoundGenerator::default().generate(DifficultyLevel::FIRST, &mut rng);

        assert_eq!(round.target(), CellIndex::new(13));
        assert_eq!(round.cells().len(), 25);
        assert_eq!(round.base().hue(), 200);
        assert_eq!(round.base().saturation(), 50);
        assert!((round.cells()[13].lightness() - 60.0).abs() < f32::EPSILON);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn smaller_grids_are_supported() {
        let mut rng = SeededRandom::new(7);
        let round = RoundGenerator::new(3).generate(DifficultyLevel::new(4), &mut rng);
        assert_eq!(round.cells().len(), 9);
        assert!(round.target().get() < 9);
    }
}
