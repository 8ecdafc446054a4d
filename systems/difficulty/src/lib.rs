#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Difficulty curve mapping a level counter to a lightness budget.

use hue_hunt_core::{DifficultyLevel, PerceptualDelta};

/// Delta granted at level one.
const OPENING_DELTA: f32 = 15.0;
/// Lightness lost every time the level doubles.
const DELTA_PER_DOUBLING: f32 = 2.5;

/// Computes the lightness budget for the provided level.
///
/// The budget shrinks by [`DELTA_PER_DOUBLING`] every time the level doubles,
/// starting from 15 at level one and flattening at the floor of 1 from level
/// 49 onwards.
#[must_use]
pub fn delta_for_level(level: DifficultyLevel) -> PerceptualDelta {
    let doublings = (level.get() as f32).log2();
    PerceptualDelta::new((OPENING_DELTA - DELTA_PER_DOUBLING * doublings).max(1.0))
}
