use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sensirise-cli", version, about = "SensiRise CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file and print the normalized alarm list
    Check {
        /// Path to the TOML config
        #[arg(long)]
        config: PathBuf,
    },
    /// Run the alarm loop against the real clock
    Run {
        /// Path to the TOML config
        #[arg(long)]
        config: PathBuf,
    },
    /// Replay a whole day tick-by-tick with auto-solved challenges
    Simulate {
        /// Path to the TOML config
        #[arg(long)]
        config: PathBuf,
        /// Override the content seed from the config
        #[arg(long)]
        seed: Option<u64>,
        /// Virtual start of day, HH:MM
        #[arg(long, default_value = "06:00")]
        from: String,
        /// Virtual end of day, HH:MM
        #[arg(long, default_value = "23:59")]
        until: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Check { config } => commands::check::run(&config),
        Commands::Run { config } => commands::run::run(&config),
        Commands::Simulate {
            config,
            seed,
            from,
            until,
        } => commands::simulate::run(&config, seed, &from, &until),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
