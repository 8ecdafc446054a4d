#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Hue Hunt engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative game session, and pure systems. Adapters submit [`Command`]
//! values describing player intent or elapsed time, the session executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that presentation layers react to. Systems are pure functions over the
//! values defined here plus an injected [`RandomSource`].

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Number of cells along each edge of the square grid.
pub const GRID_SIZE: u32 = 5;

/// Time granted when a session starts; also the ceiling for the countdown.
pub const INITIAL_TIME: Duration = Duration::from_secs(30);

/// Time credited for every correct selection.
pub const TIME_BONUS: Duration = Duration::from_secs(2);

/// Time deducted for every incorrect selection.
pub const TIME_PENALTY: Duration = Duration::from_secs(5);

/// Number of cumulative correct answers between celebrations.
pub const CELEBRATE_EVERY: u32 = 10;

/// Lowest lightness a perturbed cell may take, in percent.
pub const MIN_LIGHTNESS: f32 = 5.0;

/// Highest lightness a perturbed cell may take, in percent.
pub const MAX_LIGHTNESS: f32 = 95.0;

/// Commands that express all permissible session mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Resets the session and begins a fresh countdown from any state.
    Start,
    /// Advances the countdown by the provided delta time.
    Tick {
        /// Duration of wall-clock time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Reports that the player picked a cell of the current round.
    Select {
        /// Cell the player picked.
        cell: CellIndex,
    },
    /// Abandons the active session without reaching the end of the countdown.
    Abandon,
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a new session became active.
    SessionStarted,
    /// Announces that a fresh round replaced the previous one.
    RoundGenerated {
        /// Difficulty level the round was generated for.
        level: DifficultyLevel,
        /// Lightness budget used for the odd cell.
        delta: PerceptualDelta,
        /// Position of the odd cell within the grid.
        target: CellIndex,
    },
    /// Indicates that the countdown advanced.
    TimeAdvanced {
        /// Duration consumed by the tick.
        dt: Duration,
        /// Countdown left after the tick.
        remaining: Duration,
    },
    /// Reports how a selection was judged.
    SelectionResolved {
        /// Outcome recorded for the selection.
        outcome: Outcome,
    },
    /// Fire-and-forget notification emitted on every milestone of correct answers.
    Celebrate {
        /// Score that triggered the celebration.
        score: u32,
    },
    /// Fire-and-forget notification emitted on every incorrect selection.
    Shake {
        /// Cell that was wrongly picked.
        cell: CellIndex,
    },
    /// Confirms that the player abandoned the active session.
    SessionAbandoned,
    /// Announces that the countdown reached zero.
    SessionEnded {
        /// Final score of the session.
        score: u32,
        /// Tier awarded for the final score.
        rank: Rank,
    },
}

/// Lifecycle phase of a game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// No session has been started, or the previous one was abandoned.
    #[default]
    Idle,
    /// The countdown is running and selections are judged.
    Active,
    /// The countdown reached zero; only a new start leaves this state.
    Ended,
}

/// Color expressed in hue, saturation and lightness coordinates.
///
/// Hue and saturation are whole numbers fixed per round. Lightness is
/// fractional because the odd cell is offset by a real-valued delta.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    hue: u16,
    saturation: u8,
    lightness: f32,
}

impl Color {
    /// Creates a color from hue degrees, saturation percent and lightness percent.
    #[must_use]
    pub const fn new(hue: u16, saturation: u8, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Hue in whole degrees.
    #[must_use]
    pub const fn hue(&self) -> u16 {
        self.hue
    }

    /// Saturation in whole percent.
    #[must_use]
    pub const fn saturation(&self) -> u8 {
        self.saturation
    }

    /// Lightness in percent.
    #[must_use]
    pub const fn lightness(&self) -> f32 {
        self.lightness
    }

    /// Returns the same hue and saturation with a different lightness.
    #[must_use]
    pub const fn with_lightness(self, lightness: f32) -> Self {
        Self { lightness, ..self }
    }

    /// Canonical `hsl(H, S%, L%)` string handed to renderers.
    #[must_use]
    pub fn display_string(&self) -> String {
        self.to_string()
    }

    /// Converts the color into 8-bit sRGB channels.
    #[must_use]
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let h = f32::from(self.hue % 360);
        let s = f32::from(self.saturation.min(100)) / 100.0;
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match self.hue % 360 {
            0..=59 => (c, x, 0.0),
            60..=119 => (x, c, 0.0),
            120..=179 => (0.0, c, x),
            180..=239 => (0.0, x, c),
            240..=299 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        (to_channel(r + m), to_channel(g + m), to_channel(b + m))
    }
}

fn to_channel(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {:.1}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Monotonic difficulty counter that starts at one.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DifficultyLevel(u32);

impl DifficultyLevel {
    /// Level every session starts at.
    pub const FIRST: Self = Self(1);

    /// Creates a level, lifting zero to [`DifficultyLevel::FIRST`].
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 {
            Self::FIRST
        } else {
            Self(value)
        }
    }

    /// Retrieves the numeric level.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the level that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Lightness difference, in percentage points, separating the odd cell from the base.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct PerceptualDelta(f32);

impl PerceptualDelta {
    /// Smallest delta the difficulty curve ever produces.
    pub const MIN: Self = Self(1.0);
    /// Largest delta the difficulty curve ever produces.
    pub const MAX: Self = Self(15.0);

    /// Creates a delta clamped into `[MIN, MAX]`.
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Retrieves the delta in percentage points.
    #[must_use]
    pub const fn get(&self) -> f32 {
        self.0
    }
}

/// Zero-based position of a cell in row-major order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellIndex(u32);

impl CellIndex {
    /// Creates a new cell index.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Builds the index of the cell at `row` and `column` in a grid `grid_size` wide.
    #[must_use]
    pub const fn from_row_column(row: u32, column: u32, grid_size: u32) -> Self {
        Self(row * grid_size + column)
    }

    /// Retrieves the numeric index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Zero-based row of the cell in a grid `grid_size` wide.
    #[must_use]
    pub const fn row(&self, grid_size: u32) -> u32 {
        self.0 / grid_size
    }

    /// Zero-based column of the cell in a grid `grid_size` wide.
    #[must_use]
    pub const fn column(&self, grid_size: u32) -> u32 {
        self.0 % grid_size
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One grid challenge: identical cells except for a single odd one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    cells: Vec<Color>,
    target: CellIndex,
    base: Color,
    delta: PerceptualDelta,
}

impl Round {
    /// Assembles a round of `cell_count` cells, painting `target` with `odd` and the rest with `base`.
    ///
    /// Panics when `target` does not address one of the cells.
    #[must_use]
    pub fn new(
        cell_count: u32,
        base: Color,
        odd: Color,
        target: CellIndex,
        delta: PerceptualDelta,
    ) -> Self {
        assert!(
            target.get() < cell_count,
            "target {target} outside grid of {cell_count} cells"
        );
        let cells = (0..cell_count)
            .map(|index| if index == target.get() { odd } else { base })
            .collect();
        Self {
            cells,
            target,
            base,
            delta,
        }
    }

    /// Cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Position of the odd cell.
    #[must_use]
    pub const fn target(&self) -> CellIndex {
        self.target
    }

    /// Color shared by every cell except the target.
    #[must_use]
    pub const fn base(&self) -> Color {
        self.base
    }

    /// Lightness budget the round was generated with.
    #[must_use]
    pub const fn delta(&self) -> PerceptualDelta {
        self.delta
    }

    /// Reports whether `cell` is the odd one.
    #[must_use]
    pub fn is_target(&self, cell: CellIndex) -> bool {
        cell == self.target
    }

    /// Iterates over cells paired with their index and target flag.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, Color, bool)> + '_ {
        self.cells.iter().enumerate().map(move |(index, color)| {
            let cell = CellIndex::new(index as u32);
            (cell, *color, cell == self.target)
        })
    }
}

/// Judgement recorded for the most recent selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the selection hit the odd cell.
    pub correct: bool,
    /// Cell that was selected.
    pub cell: CellIndex,
}

/// Qualitative tier awarded for a final score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankTier {
    /// Fewer than ten correct answers.
    Novice,
    /// Ten to nineteen correct answers.
    Observer,
    /// Twenty to thirty-four correct answers.
    SharpEye,
    /// Thirty-five to forty-nine correct answers.
    ColorSage,
    /// Fifty or more correct answers.
    ChromaLegend,
}

/// Title and description shown when a session ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Rank {
    /// Tier the score fell into.
    pub tier: RankTier,
    /// Short headline for the tier.
    pub title: &'static str,
    /// One-sentence description of the tier.
    pub description: &'static str,
}

/// Tunable constants that govern a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rules {
    /// Number of cells along each grid edge.
    pub grid_size: u32,
    /// Countdown at start and its ceiling.
    pub initial_time: Duration,
    /// Time credited for a correct selection.
    pub time_bonus: Duration,
    /// Time deducted for an incorrect selection.
    pub time_penalty: Duration,
    /// Correct answers between celebrations.
    pub celebrate_every: u32,
}

impl Rules {
    /// Total number of cells in a round.
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.grid_size * self.grid_size
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            initial_time: INITIAL_TIME,
            time_bonus: TIME_BONUS,
            time_penalty: TIME_PENALTY,
            celebrate_every: CELEBRATE_EVERY,
        }
    }
}

/// Source of uniform randomness injected into round generation.
///
/// Ranges are half-open: `lo` is inclusive and `hi` exclusive.
pub trait RandomSource {
    /// Draws an integer uniformly from `lo..hi`.
    fn uniform_int(&mut self, lo: u32, hi: u32) -> u32;

    /// Draws a real number uniformly from `lo..hi`.
    fn uniform_real(&mut self, lo: f32, hi: f32) -> f32;

    /// Flips a fair coin.
    fn coin_flip(&mut self) -> bool {
        self.uniform_real(0.0, 1.0) < 0.5
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform_int(&mut self, lo: u32, hi: u32) -> u32 {
        (**self).uniform_int(lo, hi)
    }

    fn uniform_real(&mut self, lo: f32, hi: f32) -> f32 {
        (**self).uniform_real(lo, hi)
    }

    fn coin_flip(&mut self) -> bool {
        (**self).coin_flip()
    }
}

#[cfg(test)]
mod tests {
    use super::{CellIndex, Color, DifficultyLevel, Outcome, PerceptualDelta, RandomSource, Round};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn display_string_uses_hsl_notation() {
        let color = Color::new(210, 55, 47.0);
        assert_eq!(color.display_string(), "hsl(210, 55%, 47.0%)");
        assert_eq!(color.with_lightness(58.5).to_string(), "hsl(210, 55%, 58.5%)");
    }

    #[test]
    fn rgb_conversion_matches_reference_values() {
        assert_eq!(Color::new(0, 100, 50.0).to_rgb(), (255, 0, 0));
        assert_eq!(Color::new(120, 100, 50.0).to_rgb(), (0, 255, 0));
        assert_eq!(Color::new(240, 100, 25.0).to_rgb(), (0, 0, 128));
        assert_eq!(Color::new(77, 0, 100.0).to_rgb(), (255, 255, 255));
    }

    #[test]
    fn difficulty_level_never_drops_below_one() {
        assert_eq!(DifficultyLevel::new(0), DifficultyLevel::FIRST);
        assert_eq!(DifficultyLevel::FIRST.next().get(), 2);
    }

    #[test]
    fn perceptual_delta_is_clamped_into_budget() {
        assert_eq!(PerceptualDelta::new(40.0), PerceptualDelta::MAX);
        assert_eq!(PerceptualDelta::new(-3.0), PerceptualDelta::MIN);
    }

    #[test]
    fn cell_index_maps_rows_and_columns() {
        let cell = CellIndex::from_row_column(3, 2, 5);
        assert_eq!(cell.get(), 17);
        assert_eq!(cell.row(5), 3);
        assert_eq!(cell.column(5), 2);
    }

    #[test]
    fn round_paints_only_the_target_differently() {
        let base = Color::new(12, 60, 50.0);
        let odd = base.with_lightness(58.0);
        let round = Round::new(25, base, odd, CellIndex::new(7), PerceptualDelta::new(8.0));

        let targets: Vec<_> = round.iter().filter(|(_, _, is_target)| *is_target).collect();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].0, CellIndex::new(7));
        assert_eq!(targets[0].1, odd);
        assert!(round
            .iter()
            .filter(|(_, _, is_target)| !is_target)
            .all(|(_, color, _)| color == base));
    }

    #[test]
    #[should_panic(expected = "outside grid")]
    fn round_rejects_target_outside_grid() {
        let base = Color::new(12, 60, 50.0);
        let _ = Round::new(25, base, base, CellIndex::new(25), PerceptualDelta::MIN);
    }

    #[test]
    fn round_and_outcome_round_trip_through_bincode() {
        let base = Color::new(300, 45, 41.0);
        let round = Round::new(
            25,
            base,
            base.with_lightness(52.5),
            CellIndex::new(24),
            PerceptualDelta::new(11.5),
        );
        assert_round_trip(&round);
        assert_round_trip(&Outcome {
            correct: false,
            cell: CellIndex::new(3),
        });
    }

    struct HalfwayReal;

    impl RandomSource for HalfwayReal {
        fn uniform_int(&mut self, lo: u32, _hi: u32) -> u32 {
            lo
        }

        fn uniform_real(&mut self, lo: f32, hi: f32) -> f32 {
            lo + (hi - lo) * 0.75
        }
    }

    fn flip_through_reference<R: RandomSource>(mut source: R) -> bool {
        source.coin_flip()
    }

    #[test]
    fn default_coin_flip_uses_uniform_real() {
        let mut source = HalfwayReal;
        assert!(!source.coin_flip());
        assert!(!flip_through_reference(&mut source));
    }
}
