use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use clap::Args;
use pumppure_core::{Config, Difficulty, GameEngine, GamePhase, GameRng};

use super::render_events;

#[derive(Args)]
pub struct PlayArgs {
    /// Difficulty key (easy, normal, hard); unknown keys fall back to normal
    #[arg(long)]
    difficulty: Option<String>,
    /// Fixed RNG seed, overriding the configured one
    #[arg(long)]
    seed: Option<u64>,
}

pub fn run(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    config.tuning.validate()?;
    let difficulty = args
        .difficulty
        .map(|key| Difficulty::from_key(&key))
        .unwrap_or(config.difficulty);

    let mut engine = GameEngine::new(config.tuning, GameRng::new(args.seed.or(config.seed)));
    let mut cosmetic = GameRng::new(None);

    // Input arrives on its own thread so the tick loop never blocks on stdin.
    let (tx, rx) = mpsc::channel::<String>();
    let _ = thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    render_events(&engine.start(difficulty, Utc::now()));
    println!("commands: [p]ump  [c]lean up / purify  [r]eset  [q]uit");

    let mut won = false;
    loop {
        while let Ok(line) = rx.try_recv() {
            let events = match line.trim().to_ascii_lowercase().as_str() {
                "p" | "pump" => engine.pump(Utc::now()),
                "c" | "purify" => engine.purify(Utc::now()),
                "r" | "reset" => engine.reset(Utc::now()),
                "q" | "quit" => return Ok(()),
                "" => Vec::new(),
                other => {
                    println!("unknown command: {other}");
                    Vec::new()
                }
            };
            won |= round_won(&events);
            render_events(&events);
        }

        let events = engine.tick(Utc::now());
        won |= round_won(&events);
        render_events(&events);

        match engine.phase() {
            // Ended: the summary already printed. Idle: player reset away.
            GamePhase::Ended | GamePhase::Idle => break,
            _ => {}
        }
        thread::sleep(Duration::from_millis(50));
    }

    if won {
        confetti(&mut cosmetic);
    }
    Ok(())
}

fn round_won(events: &[pumppure_core::Event]) -> bool {
    events
        .iter()
        .any(|e| matches!(e, pumppure_core::Event::RoundEnded { success: true, .. }))
}

/// Text confetti for a filled meter, with a little random variation.
fn confetti(rng: &mut GameRng) {
    const PIECES: [char; 5] = ['*', '+', 'o', '~', '.'];
    for _ in 0..4 {
        let width = rng.between(30, 48);
        let mut line = String::new();
        for _ in 0..width {
            if rng.between(0, 2) == 0 {
                line.push(' ');
            } else {
                line.push(PIECES[rng.between(0, PIECES.len() as u64 - 1) as usize]);
            }
        }
        println!("{line}");
    }
}
