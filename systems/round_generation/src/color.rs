//! Color model: random base colors and lightness perturbation.

use hue_hunt_core::{Color, PerceptualDelta, RandomSource, MAX_LIGHTNESS, MIN_LIGHTNESS};

const HUE_RANGE: (u32, u32) = (0, 360);
const SATURATION_RANGE: (u32, u32) = (40, 80);
const LIGHTNESS_RANGE: (u32, u32) = (40, 60);

/// Draws a base color with a mid-range saturation and lightness.
pub fn generate_base_color<R: RandomSource + ?Sized>(rng: &mut R) -> Color {
    let hue = rng.uniform_int(HUE_RANGE.0, HUE_RANGE.1);
    let saturation = rng.uniform_int(SATURATION_RANGE.0, SATURATION_RANGE.1);
    let lightness = rng.uniform_int(LIGHTNESS_RANGE.0, LIGHTNESS_RANGE.1);
    Color::new(hue as u16, saturation as u8, lightness as f32)
}

/// Shifts the lightness of `base` by `delta` in a random direction.
///
/// The result is clamped to the displayable lightness range, so a base close
/// to either end may end up less than `delta` away from the original.
pub fn perturb<R: RandomSource + ?Sized>(base: Color, delta: PerceptualDelta, rng: &mut R) -> Color {
    let offset = if rng.coin_flip() {
        delta.get()
    } else {
        -delta.get()
    };
    let lightness = (base.lightness() + offset).clamp(MIN_LIGHTNESS, MAX_LIGHTNESS);
    base.with_lightness(lightness)
}
