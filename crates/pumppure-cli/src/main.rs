use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pumppure-cli", version, about = "Pump it Pure CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a round in the terminal
    Play(commands::play::PlayArgs),
    /// Run a scripted round and print the event log as JSON
    Simulate(commands::simulate::SimulateArgs),
    /// List the difficulty profiles
    Profiles(commands::profiles::ProfilesArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Play(args) => commands::play::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Profiles(args) => commands::profiles::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
