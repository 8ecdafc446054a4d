#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game session state for Hue Hunt.
//!
//! The session is a finite-state machine with three phases: idle, active and
//! ended. It is mutated exclusively through [`apply`], which consumes one
//! [`Command`], appends the resulting [`Event`] values and returns an owned
//! snapshot for presentation. The session is not reentrant; hosts that
//! receive ticks and selections from several threads must serialize them.

use std::time::Duration;

use hue_hunt_core::{
    CellIndex, Command, DifficultyLevel, Event, Outcome, RandomSource, Round, Rules, SessionState,
};
use hue_hunt_system_ranking::rank_for;
use hue_hunt_system_round_generation::RoundGenerator;
use log::{debug, info};

/// Represents the authoritative Hue Hunt session state.
#[derive(Debug)]
pub struct GameSession<R> {
    rules: Rules,
    generator: RoundGenerator,
    rng: R,
    state: SessionState,
    score: u32,
    level: DifficultyLevel,
    time_remaining: Duration,
    round: Option<Round>,
    last_outcome: Option<Outcome>,
}

impl<R: RandomSource> GameSession<R> {
    /// Creates an idle session that follows the default rules.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self::with_rules(Rules::default(), rng)
    }

    /// Creates an idle session that follows the provided rules.
    ///
    /// Panics when `rules.grid_size` is zero.
    #[must_use]
    pub fn with_rules(rules: Rules, rng: R) -> Self {
        Self {
            generator: RoundGenerator::new(rules.grid_size),
            rules,
            rng,
            state: SessionState::Idle,
            score: 0,
            level: DifficultyLevel::FIRST,
            time_remaining: Duration::ZERO,
            round: None,
            last_outcome: None,
        }
    }

    fn start(&mut self, out_events: &mut Vec<Event>) {
        self.state = SessionState::Active;
        self.score = 0;
        self.level = DifficultyLevel::FIRST;
        self.time_remaining = self.rules.initial_time;
        self.last_outcome = None;
        info!("session started with {:?} on the clock", self.time_remaining);
        out_events.push(Event::SessionStarted);
        self.next_round(out_events);
    }

    fn next_round(&mut self, out_events: &mut Vec<Event>) {
        let round = self.generator.generate(self.level, &mut self.rng);
        debug!(
            "level {} round: base {}, delta {:.2}, target {}",
            self.level.get(),
            round.base(),
            round.delta().get(),
            round.target()
        );
        out_events.push(Event::RoundGenerated {
            level: self.level,
            delta: round.delta(),
            target: round.target(),
        });
        self.round = Some(round);
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.state != SessionState::Active {
            return;
        }

        self.time_remaining = self.time_remaining.saturating_sub(dt);
        out_events.push(Event::TimeAdvanced {
            dt,
            remaining: self.time_remaining,
        });

        if self.time_remaining.is_zero() {
            self.end(out_events);
        }
    }

    fn select(&mut self, cell: CellIndex, out_events: &mut Vec<Event>) {
        if self.state != SessionState::Active {
            return;
        }
        assert!(
            cell.get() < self.rules.cell_count(),
            "selected cell {cell} outside grid of {} cells",
            self.rules.cell_count()
        );
        let Some(round) = self.round.as_ref() else {
            return;
        };

        let outcome = Outcome {
            correct: round.is_target(cell),
            cell,
        };
        self.last_outcome = Some(outcome);
        out_events.push(Event::SelectionResolved { outcome });

        if outcome.correct {
            self.score = self.score.saturating_add(1);
            self.level = self.level.next();
            self.time_remaining = self
                .time_remaining
                .saturating_add(self.rules.time_bonus)
                .min(self.rules.initial_time);
            debug!("cell {cell} correct, score {}", self.score);

            if self.rules.celebrate_every != 0 && self.score % self.rules.celebrate_every == 0 {
                out_events.push(Event::Celebrate { score: self.score });
            }
            self.next_round(out_events);
        } else {
            self.time_remaining = self.time_remaining.saturating_sub(self.rules.time_penalty);
            debug!(
                "cell {cell} wrong, {:?} left on the clock",
                self.time_remaining
            );
            out_events.push(Event::Shake { cell });

            if self.time_remaining.is_zero() {
                self.end(out_events);
            }
        }
    }

    fn abandon(&mut self, out_events: &mut Vec<Event>) {
        if self.state != SessionState::Active {
            return;
        }

        self.state = SessionState::Idle;
        self.round = None;
        info!("session abandoned at score {}", self.score);
        out_events.push(Event::SessionAbandoned);
    }

    fn end(&mut self, out_events: &mut Vec<Event>) {
        self.state = SessionState::Ended;
        self.time_remaining = Duration::ZERO;
        self.round = None;
        let rank = rank_for(self.score);
        info!("session ended at score {} ({})", self.score, rank.title);
        out_events.push(Event::SessionEnded {
            score: self.score,
            rank,
        });
    }
}

/// Applies the provided command to the session and returns the resulting snapshot.
///
/// Ticks, selections and abandon requests outside the active phase are
/// ignored and emit no events. Selecting a cell outside the grid while active
/// panics.
pub fn apply<R: RandomSource>(
    session: &mut GameSession<R>,
    command: Command,
    out_events: &mut Vec<Event>,
) -> query::SessionSnapshot {
    match command {
        Command::Start => session.start(out_events),
        Command::Tick { dt } => session.tick(dt, out_events),
        Command::Select { cell } => session.select(cell, out_events),
        Command::Abandon => session.abandon(out_events),
    }
    query::snapshot(session)
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use std::time::Duration;

    use hue_hunt_core::{DifficultyLevel, Outcome, Rank, Round, Rules, SessionState};
    use hue_hunt_system_ranking::rank_for;
    use serde::{Deserialize, Serialize};

    use super::GameSession;

    /// Owned, immutable picture of the session handed to presentation layers.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct SessionSnapshot {
        /// Current lifecycle phase.
        pub state: SessionState,
        /// Correct selections made in the current or most recent session.
        pub score: u32,
        /// Difficulty level of the current or most recent session.
        pub level: DifficultyLevel,
        /// Countdown left.
        pub time_remaining: Duration,
        /// Round awaiting a selection; present only while active.
        pub round: Option<Round>,
        /// Judgement of the most recent selection.
        pub last_outcome: Option<Outcome>,
    }

    /// Captures an owned snapshot of the session.
    #[must_use]
    pub fn snapshot<R>(session: &GameSession<R>) -> SessionSnapshot {
        SessionSnapshot {
            state: session.state,
            score: session.score,
            level: session.level,
            time_remaining: session.time_remaining,
            round: session.round.clone(),
            last_outcome: session.last_outcome,
        }
    }

    /// Current lifecycle phase of the session.
    #[must_use]
    pub fn state<R>(session: &GameSession<R>) -> SessionState {
        session.state
    }

    /// Round awaiting a selection, if the session is active.
    #[must_use]
    pub fn round<R>(session: &GameSession<R>) -> Option<&Round> {
        session.round.as_ref()
    }

    /// Rank earned by the finished session; absent unless it has ended.
    #[must_use]
    pub fn rank<R>(session: &GameSession<R>) -> Option<Rank> {
        (session.state == SessionState::Ended).then(|| rank_for(session.score))
    }

    /// Rules the session was created with.
    #[must_use]
    pub fn rules<R>(session: &GameSession<R>) -> &Rules {
        &session.rules
    }
}
