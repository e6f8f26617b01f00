//! CLI frontend for the Scoundrel roll engine.

mod commands;

use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "scoundrel",
    about = "Scoundrel — a turn workflow engine for scene-based tabletop sessions",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a complete scripted action roll against a built-in scene
    Demo {
        /// RNG seed for reproducible dice
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Push yourself (+1 die, 2 stress after the roll)
        #[arg(long)]
        push: bool,

        /// Take the devil's bargain (+1 die)
        #[arg(long, conflicts_with = "push")]
        bargain: bool,

        /// Ask the second player for help (+1 die, 1 stress to them)
        #[arg(long)]
        helper: bool,

        /// Resist the consequences instead of accepting them
        #[arg(long)]
        resist: bool,
    },

    /// Estimate outcome odds for a dice pool
    Odds {
        /// Action rating forming the base pool
        #[arg(long, default_value_t = 2)]
        rating: u32,

        /// Extra dice added to the pool
        #[arg(long, default_value_t = 0)]
        bonus: u32,

        /// Number of rolls to simulate
        #[arg(long, default_value_t = 10_000)]
        trials: u32,

        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Demo {
            seed,
            push,
            bargain,
            helper,
            resist,
        } => commands::demo::run(seed, push, bargain, helper, resist),
        Commands::Odds {
            rating,
            bonus,
            trials,
            seed,
        } => commands::odds::run(rating, bonus, trials, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
