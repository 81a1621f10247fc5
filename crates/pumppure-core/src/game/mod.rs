mod clock;
mod contamination;
mod engine;
mod milestones;

pub use clock::RoundClock;
pub use contamination::ContaminationScheduler;
pub use engine::{GameEngine, GamePhase};
pub use milestones::{Milestone, MilestoneTracker};
