#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Maps a final score to the rank shown when a session ends.

use hue_hunt_core::{Rank, RankTier};

/// Exclusive upper score bound of every tier but the last, in ascending order.
const TIERS: [(u32, RankTier); 4] = [
    (10, RankTier::Novice),
    (20, RankTier::Observer),
    (35, RankTier::SharpEye),
    (50, RankTier::ColorSage),
];

/// Returns the rank awarded for `score`.
///
/// A score equal to a threshold belongs to the next tier up.
#[must_use]
pub fn rank_for(score: u32) -> Rank {
    let tier = TIERS
        .iter()
        .find(|(bound, _)| score < *bound)
        .map_or(RankTier::ChromaLegend, |(_, tier)| *tier);
    describe(tier)
}

/// Title and description of a tier.
#[must_use]
pub const fn describe(tier: RankTier) -> Rank {
    let (title, description) = match tier {
        RankTier::Novice => (
            "Color Novice",
            "Every grid looks the same for now. Keep training your eyes.",
        ),
        RankTier::Observer => (
            "Keen Observer",
            "You catch the obvious differences quickly.",
        ),
        RankTier::SharpEye => (
            "Sharp Eye",
            "Subtle shifts in lightness rarely get past you.",
        ),
        RankTier::ColorSage => (
            "Color Sage",
            "You spot differences most people cannot see at all.",
        ),
        RankTier::ChromaLegend => (
            "Chroma Legend",
            "Your color perception is in a league of its own.",
        ),
    };
    Rank {
        tier,
        title,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_belong_to_the_next_tier() {
        assert_eq!(rank_for(0).tier, RankTier::Novice);
        assert_eq!(rank_for(9).tier, RankTier::Novice);
        assert_eq!(rank_for(10).tier, RankTier::Observer);
        assert_eq!(rank_for(19).tier, RankTier::Observer);
        assert_eq!(rank_for(20).tier, RankTier::SharpEye);
        assert_eq!(rank_for(34).tier, RankTier::SharpEye);
        assert_eq!(rank_for(35).tier, RankTier::ColorSage);
        assert_eq!(rank_for(49).tier, RankTier::ColorSage);
        assert_eq!(rank_for(50).tier, RankTier::ChromaLegend);
        assert_eq!(rank_for(u32::MAX).tier, RankTier::ChromaLegend);
    }

    #[test]
    fn tiers_never_go_down_as_score_rises() {
        let order = |tier: RankTier| match tier {
            RankTier::Novice => 0,
            RankTier::Observer => 1,
            RankTier::SharpEye => 2,
            RankTier::ColorSage => 3,
            RankTier::ChromaLegend => 4,
        };
        let mut previous = order(rank_for(0).tier);
        for score in 1..200 {
            let current = order(rank_for(score).tier);
            assert!(current >= previous, "score {score} dropped a tier");
            previous = current;
        }
    }

    #[test]
    fn every_tier_has_distinct_text() {
        let titles: std::collections::HashSet<_> =
            [0, 10, 20, 35, 50].iter().map(|&score| rank_for(score).title).collect();
        assert_eq!(titles.len(), 5);
        assert!(!rank_for(42).description.is_empty());
    }
}
