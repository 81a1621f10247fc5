use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::game::GamePhase;

/// Every state change in the round produces an Event.
/// Adapters render these; the core never touches a display surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    RoundStarted {
        difficulty: Difficulty,
        duration_secs: u32,
        /// Percent added per accepted pump this round.
        pump_gain_pct: f64,
        at: DateTime<Utc>,
    },
    ProgressChanged {
        progress_pct: f64,
        at: DateTime<Utc>,
    },
    ScoreChanged {
        score: u32,
        at: DateTime<Utc>,
    },
    TimeChanged {
        seconds_left: u32,
        at: DateTime<Utc>,
    },
    ContaminationChanged {
        contaminated: bool,
        at: DateTime<Utc>,
    },
    MilestoneReached {
        threshold_pct: f64,
        message: String,
        at: DateTime<Utc>,
    },
    /// Outcome of a pump attempt. `accepted` is false while contaminated.
    PumpApplied {
        accepted: bool,
        at: DateTime<Utc>,
    },
    /// Outcome of a purify attempt. `accepted` is false while already clean.
    PurifyApplied {
        accepted: bool,
        at: DateTime<Utc>,
    },
    RoundEnded {
        success: bool,
        final_progress_pct: f64,
        final_score: u32,
        difficulty_label: String,
        at: DateTime<Utc>,
    },
    RoundReset {
        at: DateTime<Utc>,
    },
    /// Full state for adapters that join late or poll instead of subscribing.
    StateSnapshot {
        phase: GamePhase,
        score: u32,
        progress_pct: f64,
        seconds_left: u32,
        pump_gain_pct: f64,
        contaminated: bool,
        difficulty: Difficulty,
        at: DateTime<Utc>,
    },
}
