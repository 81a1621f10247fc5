//! Game engine implementation.
//!
//! The engine is a wall-clock-based state machine. It does not use internal
//! threads - the caller passes the current time into every command and is
//! responsible for calling `tick()` periodically.
//!
//! ## Phase Transitions
//!
//! ```text
//! Idle -> Clean <-> Contaminated -> Ended -> (start: Clean | reset: Idle)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = GameEngine::new(Tuning::default(), GameRng::new(None));
//! let events = engine.start(Difficulty::Normal, Utc::now());
//! // In a loop:
//! engine.tick(Utc::now()); // countdown + contamination deadlines
//! engine.pump(Utc::now());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::clock::RoundClock;
use super::contamination::ContaminationScheduler;
use super::milestones::MilestoneTracker;
use crate::config::Tuning;
use crate::difficulty::{Difficulty, DifficultyProfile};
use crate::events::Event;
use crate::rng::GameRng;

/// A full meter wins the round.
const FULL_METER_PCT: f64 = 100.0;

/// pump_gain = 100/N rarely sums back to exactly 100 in floating point;
/// anything within this slack of full counts as full.
const PROGRESS_SLACK: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Idle,
    Clean,
    Contaminated,
    /// Round over; a summary was emitted. `start` replays, `reset` idles.
    Ended,
}

impl GamePhase {
    /// A round is in flight.
    pub fn is_active(self) -> bool {
        matches!(self, GamePhase::Clean | GamePhase::Contaminated)
    }
}

/// Core game engine.
///
/// Owns the whole round state plus both deadline timers, so deactivation can
/// always reach and disarm them. Every command returns the batch of events
/// the transition produced, in emission order.
#[derive(Debug, Clone)]
pub struct GameEngine {
    tuning: Tuning,
    difficulty: Difficulty,
    profile: DifficultyProfile,
    phase: GamePhase,
    score: u32,
    progress: f64,
    seconds_left: u32,
    /// Percent per accepted pump, recomputed each round.
    pump_gain: f64,
    clock: RoundClock,
    contamination: ContaminationScheduler,
    milestones: MilestoneTracker,
    rng: GameRng,
}

impl GameEngine {
    /// Create an idle engine with the default milestone ladder.
    pub fn new(tuning: Tuning, rng: GameRng) -> Self {
        let difficulty = Difficulty::default();
        let profile = difficulty.profile();
        Self {
            tuning,
            difficulty,
            profile,
            phase: GamePhase::Idle,
            score: 0,
            progress: 0.0,
            seconds_left: profile.duration_secs,
            pump_gain: 0.0,
            clock: RoundClock::new(),
            contamination: ContaminationScheduler::new(),
            milestones: MilestoneTracker::default_ladder(),
            rng,
        }
    }

    /// Replace the milestone ladder (before the first round).
    pub fn with_milestones(mut self, milestones: MilestoneTracker) -> Self {
        self.milestones = milestones;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    pub fn contaminated(&self) -> bool {
        self.phase == GamePhase::Contaminated
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// 0.0 .. 100.0 meter fill.
    pub fn progress_pct(&self) -> f64 {
        self.progress
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn pump_gain_pct(&self) -> f64 {
        self.pump_gain
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now: DateTime<Utc>) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            score: self.score,
            progress_pct: self.progress,
            seconds_left: self.seconds_left,
            pump_gain_pct: self.pump_gain,
            contaminated: self.contaminated(),
            difficulty: self.difficulty,
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a round. Valid from `Idle` and `Ended` (replay); a no-op while
    /// a round is already running.
    pub fn start(&mut self, difficulty: Difficulty, now: DateTime<Utc>) -> Vec<Event> {
        if self.is_active() {
            return Vec::new();
        }
        self.difficulty = difficulty;
        self.profile = difficulty.profile();

        // Vary the effort per round: N pumps must land exactly on a full
        // meter, so each pump adds 100/N percent.
        let pumps_needed = self
            .rng
            .between(self.tuning.pump_count_min, self.tuning.pump_count_max)
            .max(1);
        self.pump_gain = FULL_METER_PCT / pumps_needed as f64;

        self.score = 0;
        self.progress = 0.0;
        self.seconds_left = self.profile.duration_secs;
        self.milestones.reset();
        self.phase = GamePhase::Clean;
        self.clock.start(now);
        self.contamination.arm(now, &self.profile, &mut self.rng);

        vec![
            Event::RoundStarted {
                difficulty,
                duration_secs: self.seconds_left,
                pump_gain_pct: self.pump_gain,
                at: now,
            },
            Event::ScoreChanged { score: 0, at: now },
            Event::ProgressChanged {
                progress_pct: 0.0,
                at: now,
            },
            Event::TimeChanged {
                seconds_left: self.seconds_left,
                at: now,
            },
            Event::ContaminationChanged {
                contaminated: false,
                at: now,
            },
        ]
    }

    /// A pump attempt. Rejected with a penalty while contaminated; silent
    /// while no round is running.
    pub fn pump(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        match self.phase {
            GamePhase::Contaminated => {
                // Wrong action: the pump pulls dirty water back in.
                self.score = self.score.saturating_sub(self.tuning.pump_penalty);
                self.progress = (self.progress - self.pump_gain).max(0.0);
                vec![
                    Event::PumpApplied {
                        accepted: false,
                        at: now,
                    },
                    Event::ScoreChanged {
                        score: self.score,
                        at: now,
                    },
                    Event::ProgressChanged {
                        progress_pct: self.progress,
                        at: now,
                    },
                ]
            }
            GamePhase::Clean => {
                self.progress = (self.progress + self.pump_gain).min(FULL_METER_PCT);
                self.score += 1;
                let mut events = vec![
                    Event::PumpApplied {
                        accepted: true,
                        at: now,
                    },
                    Event::ScoreChanged {
                        score: self.score,
                        at: now,
                    },
                    Event::ProgressChanged {
                        progress_pct: self.progress,
                        at: now,
                    },
                ];
                for milestone in self.milestones.check(self.progress) {
                    events.push(Event::MilestoneReached {
                        threshold_pct: milestone.threshold_pct,
                        message: milestone.message,
                        at: now,
                    });
                }
                if self.progress >= FULL_METER_PCT - PROGRESS_SLACK {
                    self.progress = FULL_METER_PCT;
                    events.extend(self.end(true, now));
                }
                events
            }
            GamePhase::Idle | GamePhase::Ended => Vec::new(),
        }
    }

    /// A purify attempt. Rejected without state change while already clean;
    /// silent while no round is running.
    pub fn purify(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        match self.phase {
            GamePhase::Clean => vec![Event::PurifyApplied {
                accepted: false,
                at: now,
            }],
            GamePhase::Contaminated => {
                self.phase = GamePhase::Clean;
                // Clean again: plan the next contamination.
                self.contamination.arm(now, &self.profile, &mut self.rng);
                vec![
                    Event::PurifyApplied {
                        accepted: true,
                        at: now,
                    },
                    Event::ContaminationChanged {
                        contaminated: false,
                        at: now,
                    },
                ]
            }
            GamePhase::Idle | GamePhase::Ended => Vec::new(),
        }
    }

    /// Advance both deadline timers. Call periodically; sub-second calls are
    /// cheap. Ticks while no round is running are silent no-ops.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        if !self.is_active() {
            return Vec::new();
        }
        let mut events = Vec::new();

        // The contamination deadline may be stale (purified between arm and
        // fire overwrites it, end cancels it); the phase check here is the
        // liveness guard for whatever still fires.
        if self.contamination.poll(now) && self.phase == GamePhase::Clean {
            self.phase = GamePhase::Contaminated;
            events.push(Event::ContaminationChanged {
                contaminated: true,
                at: now,
            });
        }

        let elapsed = self.clock.poll(now);
        for _ in 0..elapsed {
            self.seconds_left = self.seconds_left.saturating_sub(1);
            events.push(Event::TimeChanged {
                seconds_left: self.seconds_left,
                at: now,
            });
            if self.seconds_left == 0 {
                events.extend(self.end(false, now));
                break;
            }
        }
        events
    }

    /// Forcibly clear the round without a result summary. Valid in any phase.
    pub fn reset(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        self.clock.stop();
        self.contamination.cancel();
        self.phase = GamePhase::Idle;
        self.score = 0;
        self.progress = 0.0;
        self.seconds_left = self.profile.duration_secs;
        self.milestones.reset();
        vec![
            Event::RoundReset { at: now },
            Event::ScoreChanged { score: 0, at: now },
            Event::ProgressChanged {
                progress_pct: 0.0,
                at: now,
            },
            Event::TimeChanged {
                seconds_left: self.seconds_left,
                at: now,
            },
            Event::ContaminationChanged {
                contaminated: false,
                at: now,
            },
        ]
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Close the round. Both timers are disarmed before the summary goes
    /// out, so nothing scheduled during the round can outlive it.
    fn end(&mut self, won: bool, now: DateTime<Utc>) -> Vec<Event> {
        if !self.is_active() {
            return Vec::new();
        }
        self.phase = GamePhase::Ended;
        self.clock.stop();
        self.contamination.cancel();
        let success = won || self.progress >= FULL_METER_PCT;
        vec![Event::RoundEnded {
            success,
            final_progress_pct: self.progress,
            final_score: self.score,
            difficulty_label: self.difficulty.label().to_string(),
            at: now,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn fixed_gain_engine(pumps: u64) -> GameEngine {
        let tuning = Tuning {
            pump_penalty: 1,
            pump_count_min: pumps,
            pump_count_max: pumps,
        };
        GameEngine::new(tuning, GameRng::new(Some(42)))
    }

    fn t0() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn idle_engine_ignores_pump_purify_and_tick() {
        let mut engine = fixed_gain_engine(25);
        assert!(engine.pump(t0()).is_empty());
        assert!(engine.purify(t0()).is_empty());
        assert!(engine.tick(t0()).is_empty());
        assert_eq!(engine.phase(), GamePhase::Idle);
    }

    #[test]
    fn start_samples_gain_and_resets_state() {
        let now = t0();
        let mut engine = fixed_gain_engine(25);
        let events = engine.start(Difficulty::Normal, now);
        assert_eq!(engine.phase(), GamePhase::Clean);
        assert_eq!(engine.pump_gain_pct(), 4.0);
        assert_eq!(engine.seconds_left(), 45);
        assert!(matches!(events[0], Event::RoundStarted { .. }));
    }

    #[test]
    fn start_while_active_is_a_no_op() {
        let now = t0();
        let mut engine = fixed_gain_engine(25);
        let _ = engine.start(Difficulty::Normal, now);
        let _ = engine.pump(now);
        assert!(engine.start(Difficulty::Hard, now).is_empty());
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.difficulty(), Difficulty::Normal);
    }

    #[test]
    fn clean_pump_raises_progress_and_score() {
        let now = t0();
        let mut engine = fixed_gain_engine(25);
        let _ = engine.start(Difficulty::Normal, now);
        let events = engine.pump(now);
        assert_eq!(engine.progress_pct(), 4.0);
        assert_eq!(engine.score(), 1);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::PumpApplied { accepted: true, .. })));
    }

    #[test]
    fn winning_pump_clamps_to_exactly_full() {
        let now = t0();
        let mut engine = fixed_gain_engine(25);
        let _ = engine.start(Difficulty::Normal, now);
        for _ in 0..24 {
            let _ = engine.pump(now);
        }
        assert_eq!(engine.progress_pct(), 96.0);
        let events = engine.pump(now);
        assert_eq!(engine.progress_pct(), 100.0);
        assert_eq!(engine.phase(), GamePhase::Ended);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::RoundEnded { success: true, .. })));
    }

    #[test]
    fn uneven_gain_still_lands_on_full() {
        // 100/35 does not sum to 100.0 exactly in f64.
        let now = t0();
        let mut engine = fixed_gain_engine(35);
        let _ = engine.start(Difficulty::Normal, now);
        for _ in 0..35 {
            let _ = engine.pump(now);
        }
        assert_eq!(engine.progress_pct(), 100.0);
        assert_eq!(engine.phase(), GamePhase::Ended);
    }

    #[test]
    fn contaminated_pump_penalizes_and_never_wins() {
        let now = t0();
        let mut engine = fixed_gain_engine(25);
        let _ = engine.start(Difficulty::Normal, now);
        for _ in 0..5 {
            let _ = engine.pump(now);
        }
        // Contamination always lands within the profile maximum.
        let later = now + Duration::seconds(3);
        let _ = engine.tick(later);
        assert_eq!(engine.phase(), GamePhase::Contaminated);

        let events = engine.pump(later);
        assert_eq!(engine.score(), 4);
        assert_eq!(engine.progress_pct(), 16.0);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::PumpApplied { accepted: false, .. })));
        assert!(!events
            .iter()
            .any(|e| matches!(e, Event::RoundEnded { .. })));
    }

    #[test]
    fn contaminated_pump_floors_score_and_progress_at_zero() {
        let now = t0();
        let mut engine = fixed_gain_engine(25);
        let _ = engine.start(Difficulty::Normal, now);
        let later = now + Duration::seconds(3);
        let _ = engine.tick(later);
        assert_eq!(engine.phase(), GamePhase::Contaminated);
        for _ in 0..3 {
            let _ = engine.pump(later);
        }
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.progress_pct(), 0.0);
    }

    #[test]
    fn purify_while_clean_changes_nothing() {
        let now = t0();
        let mut engine = fixed_gain_engine(25);
        let _ = engine.start(Difficulty::Normal, now);
        let _ = engine.pump(now);
        let events = engine.purify(now);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            Event::PurifyApplied {
                accepted: false,
                ..
            }
        ));
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.progress_pct(), 4.0);
    }

    #[test]
    fn purify_clears_contamination_and_rearms() {
        let now = t0();
        let mut engine = fixed_gain_engine(25);
        let _ = engine.start(Difficulty::Normal, now);
        let first = now + Duration::seconds(3);
        let _ = engine.tick(first);
        assert_eq!(engine.phase(), GamePhase::Contaminated);

        let events = engine.purify(first);
        assert_eq!(engine.phase(), GamePhase::Clean);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::PurifyApplied { accepted: true, .. })));

        // The rearmed deadline fires again within the profile maximum.
        let second = first + Duration::seconds(3);
        let _ = engine.tick(second);
        assert_eq!(engine.phase(), GamePhase::Contaminated);
    }

    #[test]
    fn countdown_reaching_zero_ends_without_success() {
        let now = t0();
        let mut engine = fixed_gain_engine(25);
        let _ = engine.start(Difficulty::Normal, now);
        for _ in 0..15 {
            let _ = engine.pump(now);
        }
        let events = engine.tick(now + Duration::seconds(46));
        assert_eq!(engine.phase(), GamePhase::Ended);
        assert_eq!(engine.seconds_left(), 0);
        assert!(events.iter().any(|e| matches!(
            e,
            Event::RoundEnded {
                success: false,
                final_progress_pct: p,
                ..
            } if *p == 60.0
        )));
    }

    #[test]
    fn ticks_after_the_round_ended_are_silent() {
        let now = t0();
        let mut engine = fixed_gain_engine(25);
        let _ = engine.start(Difficulty::Normal, now);
        let _ = engine.tick(now + Duration::seconds(46));
        assert_eq!(engine.phase(), GamePhase::Ended);
        assert!(engine.tick(now + Duration::seconds(60)).is_empty());
        assert!(engine.pump(now + Duration::seconds(60)).is_empty());
    }

    #[test]
    fn reset_returns_to_idle_baseline() {
        let now = t0();
        let mut engine = fixed_gain_engine(25);
        let _ = engine.start(Difficulty::Hard, now);
        for _ in 0..4 {
            let _ = engine.pump(now);
        }
        let events = engine.reset(now);
        assert_eq!(engine.phase(), GamePhase::Idle);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.progress_pct(), 0.0);
        assert_eq!(engine.seconds_left(), Difficulty::Hard.profile().duration_secs);
        assert!(matches!(events[0], Event::RoundReset { .. }));
        // Stale deadlines from the cleared round stay silent.
        assert!(engine.tick(now + Duration::seconds(60)).is_empty());
    }

    #[test]
    fn replay_starts_fresh_from_ended() {
        let now = t0();
        let mut engine = fixed_gain_engine(25);
        let _ = engine.start(Difficulty::Normal, now);
        let _ = engine.tick(now + Duration::seconds(46));
        assert_eq!(engine.phase(), GamePhase::Ended);

        let replay_at = now + Duration::seconds(50);
        let events = engine.start(Difficulty::Easy, replay_at);
        assert!(matches!(events[0], Event::RoundStarted { .. }));
        assert_eq!(engine.phase(), GamePhase::Clean);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.seconds_left(), 60);
        assert_eq!(engine.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn milestones_do_not_refire_after_contaminated_losses() {
        let now = t0();
        let mut engine = fixed_gain_engine(25);
        let _ = engine.start(Difficulty::Normal, now);
        for _ in 0..3 {
            let _ = engine.pump(now); // 12%: the 10% milestone fires
        }
        let later = now + Duration::seconds(3);
        let _ = engine.tick(later);
        let _ = engine.pump(later); // down to 8%
        let _ = engine.purify(later);
        let events = engine.pump(later); // back to 12%
        assert!(!events
            .iter()
            .any(|e| matches!(e, Event::MilestoneReached { .. })));
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let now = t0();
        let mut engine = fixed_gain_engine(25);
        let _ = engine.start(Difficulty::Normal, now);
        let _ = engine.pump(now);
        match engine.snapshot(now) {
            Event::StateSnapshot {
                phase,
                score,
                progress_pct,
                seconds_left,
                contaminated,
                ..
            } => {
                assert_eq!(phase, GamePhase::Clean);
                assert_eq!(score, 1);
                assert_eq!(progress_pct, 4.0);
                assert_eq!(seconds_left, 45);
                assert!(!contaminated);
            }
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
    }
}
