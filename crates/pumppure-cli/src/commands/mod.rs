pub mod config;
pub mod play;
pub mod profiles;
pub mod simulate;

use pumppure_core::Event;

/// Render a batch of core events as terminal lines.
pub fn render_events(events: &[Event]) {
    for event in events {
        match event {
            Event::RoundStarted {
                difficulty,
                duration_secs,
                pump_gain_pct,
                ..
            } => {
                println!(
                    "round started ({}): {duration_secs}s to fill the tank, {:.2}% per pump",
                    difficulty.label(),
                    pump_gain_pct
                );
            }
            Event::TimeChanged { seconds_left, .. } => {
                println!("  {seconds_left:>2}s left");
            }
            Event::ProgressChanged { progress_pct, .. } => {
                println!("  meter {:>5.1}%", progress_pct);
            }
            Event::ScoreChanged { score, .. } => {
                println!("  score {score}");
            }
            Event::ContaminationChanged { contaminated, .. } => {
                if *contaminated {
                    println!("!! the water turned BROWN -- purify before pumping");
                } else {
                    println!("   water clean");
                }
            }
            Event::MilestoneReached { message, .. } => {
                println!(">> {message}");
            }
            Event::PumpApplied { accepted: false, .. } => {
                println!("   pump blocked: the water is contaminated");
            }
            Event::PurifyApplied { accepted: false, .. } => {
                println!("   nothing to purify right now");
            }
            Event::PumpApplied { .. } | Event::PurifyApplied { .. } => {}
            Event::RoundEnded {
                success,
                final_progress_pct,
                final_score,
                difficulty_label,
                ..
            } => {
                if *success {
                    println!(
                        "great job! meter filled to {final_progress_pct:.0}% with score \
                         {final_score} on {difficulty_label}"
                    );
                } else {
                    println!(
                        "time's up! you reached {final_progress_pct:.0}% with score \
                         {final_score} on {difficulty_label} -- try again"
                    );
                }
            }
            Event::RoundReset { .. } => {
                println!("round reset");
            }
            Event::StateSnapshot { .. } => {}
        }
    }
}
