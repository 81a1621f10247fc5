use chrono::{Duration, Utc};
use clap::Args;
use pumppure_core::{Config, Difficulty, GameEngine, GamePhase, GameRng};

#[derive(Args)]
pub struct SimulateArgs {
    /// Difficulty key (easy, normal, hard)
    #[arg(long, default_value = "normal")]
    difficulty: String,
    /// Fixed RNG seed for a reproducible round
    #[arg(long)]
    seed: Option<u64>,
    /// Action script: comma-separated pump | purify | reset | wait:<ms>
    #[arg(long, default_value = "pump,wait:1000,pump")]
    script: String,
    /// Compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

/// Drive a whole round from a script on a virtual clock and print every
/// event the engine produced, ending with a state snapshot.
pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    config.tuning.validate()?;
    let difficulty = Difficulty::from_key(&args.difficulty);
    let mut engine = GameEngine::new(config.tuning, GameRng::new(args.seed.or(config.seed)));

    let mut now = Utc::now();
    let mut log = engine.start(difficulty, now);

    for token in args
        .script
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        let events = match token {
            "pump" => engine.pump(now),
            "purify" => engine.purify(now),
            "reset" => engine.reset(now),
            _ => match token.strip_prefix("wait:") {
                Some(ms) => {
                    let ms: i64 = ms
                        .parse()
                        .map_err(|_| format!("invalid wait duration in '{token}'"))?;
                    now += Duration::milliseconds(ms);
                    engine.tick(now)
                }
                None => {
                    return Err(format!(
                        "unknown action '{token}' (expected pump, purify, reset or wait:<ms>)"
                    )
                    .into())
                }
            },
        };
        log.extend(events);
        if engine.phase() == GamePhase::Ended {
            break;
        }
    }
    log.push(engine.snapshot(now));

    let json = if args.compact {
        serde_json::to_string(&log)?
    } else {
        serde_json::to_string_pretty(&log)?
    };
    println!("{json}");
    Ok(())
}
