//! drape CLI: scenario simulation, benchmarking and snapshot inspection.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "drape")]
#[command(version, about = "drape: real-time mass-spring cloth simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario described by a config file.
    Simulate {
        /// Path to scenario config (TOML).
        #[arg(short, long, default_value = "scenario.toml")]
        config: String,

        /// Write recorded frames to this JSON file.
        #[arg(short, long)]
        output: Option<String>,

        /// Write a binary snapshot of the final state to this file.
        #[arg(short, long)]
        snapshot: Option<String>,
    },

    /// Run canonical scenarios and report metrics.
    Benchmark {
        /// Which scenario to run (hanging_sheet, framed_sheet, corner_pinned, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Inspect a state snapshot file.
    Inspect {
        /// Path to snapshot file.
        path: String,
    },

    /// Validate a scenario config (.toml) or a recorded frame file (.json).
    Validate {
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            config,
            output,
            snapshot,
        } => commands::simulate(&config, output.as_deref(), snapshot.as_deref()),
        Commands::Benchmark { scenario, output } => {
            commands::benchmark(&scenario, output.as_deref())
        }
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
