use hue_hunt_core::{DifficultyLevel, MAX_LIGHTNESS, MIN_LIGHTNESS};
use hue_hunt_system_difficulty::delta_for_level;
use hue_hunt_system_round_generation::{RoundGenerator, SeededRandom};

#[test]
fn every_round_has_one_odd_cell_and_identical_others() {
    let generator = RoundGenerator::default();
    let mut rng = SeededRandom::new(0x1234_5678);

    for level in 1..=120 {
        let level = DifficultyLevel::new(level);
        let round = generator.generate(level, &mut rng);

        assert_eq!(round.cells().len(), 25);
        let targets: Vec<_> = round.iter().filter(|(_, _, is_target)| *is_target).collect();
        assert_eq!(targets.len(), 1, "level {}", level.get());
        assert_eq!(targets[0].0, round.target());

        let base = round.base();
        for (cell, color, is_target) in round.iter() {
            if !is_target {
                assert_eq!(color, base, "cell {cell} differs from the base");
            }
        }
    }
}

#[test]
fn odd_cell_is_offset_by_the_level_budget_unless_clamped() {
    let generator = RoundGenerator::default();
    let mut rng = SeededRandom::new(99);

    for level in 1..=80 {
        let level = DifficultyLevel::new(level);
        let round = generator.generate(level, &mut rng);
        let expected = delta_for_level(level);
        assert_eq!(round.delta(), expected);

        let base = round.base();
        let odd = round.cells()[round.target().get() as usize];
        assert_eq!(odd.hue(), base.hue());
        assert_eq!(odd.saturation(), base.saturation());

        let observed = (odd.lightness() - base.lightness()).abs();
        let clamped = odd.lightness() <= MIN_LIGHTNESS || odd.lightness() >= MAX_LIGHTNESS;
        if clamped {
            assert!(observed <= expected.get() + 1e-4);
        } else {
            assert!(
                (observed - expected.get()).abs() < 1e-4,
                "level {}: observed {observed}, expected {}",
                level.get(),
                expected.get()
            );
        }
    }
}

#[test]
fn targets_cover_the_whole_grid() {
    let generator = RoundGenerator::default();
    let mut rng = SeededRandom::new(2024);
    let mut seen = [false; 25];

    for _ in 0..2_000 {
        let round = generator.generate(DifficultyLevel::FIRST, &mut rng);
        seen[round.target().get() as usize] = true;
    }

    assert!(seen.iter().all(|hit| *hit), "some cells never hosted the target");
}
