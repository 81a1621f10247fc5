//! Round countdown clock.
//!
//! One-second resolution, no internal thread: the clock holds the next
//! whole-second deadline and the engine polls it from `tick()`. Stopping
//! disarms the deadline, so a poll that races a finished round is a no-op.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Default)]
pub struct RoundClock {
    next_due: Option<DateTime<Utc>>,
}

impl RoundClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the countdown. Any previous deadline is replaced.
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.next_due = Some(now + Duration::seconds(1));
    }

    /// Disarm the clock.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Whole seconds elapsed since the previous poll, advancing the deadline
    /// past `now`. Returns 0 while stopped.
    pub fn poll(&mut self, now: DateTime<Utc>) -> u32 {
        let Some(mut due) = self.next_due else {
            return 0;
        };
        let mut elapsed = 0;
        while due <= now {
            elapsed += 1;
            due += Duration::seconds(1);
        }
        self.next_due = Some(due);
        elapsed
    }
}
