//! Progress milestones.
//!
//! An ascending ladder of percent thresholds, each firing its message at
//! most once per round. A single large pump can cross several thresholds in
//! one update; they fire in ascending order within that update.

/// A progress threshold with its announcement.
#[derive(Debug, Clone)]
pub struct Milestone {
    pub threshold_pct: f64,
    pub message: String,
}

impl Milestone {
    pub fn new(threshold_pct: f64, message: impl Into<String>) -> Self {
        Self {
            threshold_pct,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MilestoneTracker {
    milestones: Vec<Milestone>,
    fired: Vec<bool>,
}

impl MilestoneTracker {
    /// Out-of-order input is sorted so firing order is always ascending.
    pub fn new(mut milestones: Vec<Milestone>) -> Self {
        milestones.sort_by(|a, b| a.threshold_pct.total_cmp(&b.threshold_pct));
        let fired = vec![false; milestones.len()];
        Self { milestones, fired }
    }

    /// The ladder used by the game.
    pub fn default_ladder() -> Self {
        Self::new(vec![
            Milestone::new(10.0, "First clean water in the tank!"),
            Milestone::new(25.0, "A quarter full. Keep pumping!"),
            Milestone::new(40.0, "The meter is climbing fast."),
            Milestone::new(50.0, "Halfway there. The village cheers!"),
            Milestone::new(75.0, "Three quarters full. Strong arms!"),
            Milestone::new(90.0, "Nearly full. Final push!"),
        ])
    }

    /// Forget everything fired; called at round start and on reset.
    pub fn reset(&mut self) {
        for fired in &mut self.fired {
            *fired = false;
        }
    }

    /// Every not-yet-fired milestone at or below `progress_pct`, ascending.
    /// Each returned milestone is marked fired and will not repeat this round.
    pub fn check(&mut self, progress_pct: f64) -> Vec<Milestone> {
        let mut reached = Vec::new();
        for (milestone, fired) in self.milestones.iter().zip(self.fired.iter_mut()) {
            if !*fired && milestone.threshold_pct <= progress_pct {
                *fired = true;
                reached.push(milestone.clone());
            }
        }
        reached
    }
}

impl Default for MilestoneTracker {
    fn default() -> Self {
        Self::default_ladder()
    }
}
