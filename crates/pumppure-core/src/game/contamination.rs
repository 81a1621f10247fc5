//! Contamination scheduler.
//!
//! A one-shot deadline armed whenever the water turns clean during an
//! active round, with a delay drawn uniformly from the profile's bounds.
//! Firing only disarms the deadline -- the engine decides whether the fire
//! still applies by re-checking the round phase, so a deadline left over
//! from an earlier round can never contaminate a later one.

use chrono::{DateTime, Duration, Utc};

use crate::difficulty::DifficultyProfile;
use crate::rng::GameRng;

#[derive(Debug, Clone, Default)]
pub struct ContaminationScheduler {
    due: Option<DateTime<Utc>>,
}

impl ContaminationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a single future contamination, replacing any pending one.
    pub fn arm(&mut self, now: DateTime<Utc>, profile: &DifficultyProfile, rng: &mut GameRng) {
        let delay_ms = rng.between(profile.contamination_min_ms, profile.contamination_max_ms);
        self.due = Some(now + Duration::milliseconds(delay_ms as i64));
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    /// True exactly once when the armed deadline has elapsed; disarms itself.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
