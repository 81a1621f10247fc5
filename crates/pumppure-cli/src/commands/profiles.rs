use clap::Args;
use pumppure_core::Difficulty;
use serde::Serialize;

#[derive(Args)]
pub struct ProfilesArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ProfileRow {
    key: &'static str,
    label: &'static str,
    duration_secs: u32,
    contamination_min_ms: u64,
    contamination_max_ms: u64,
}

pub fn run(args: ProfilesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<ProfileRow> = Difficulty::all()
        .into_iter()
        .map(|difficulty| {
            let profile = difficulty.profile();
            ProfileRow {
                key: difficulty.key(),
                label: difficulty.label(),
                duration_secs: profile.duration_secs,
                contamination_min_ms: profile.contamination_min_ms,
                contamination_max_ms: profile.contamination_max_ms,
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in rows {
            println!(
                "{:<8} {:>3}s round, contamination after {}-{} ms",
                row.key, row.duration_secs, row.contamination_min_ms, row.contamination_max_ms
            );
        }
    }
    Ok(())
}
