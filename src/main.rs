use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cadence::{AppError, RunOptions, SessionOutcome};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(version)]
#[command(
    about = "Drive a repository toward a randomized daily commit cadence",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scheduling session over a configured repository
    #[clap(visible_alias = "r")]
    Run {
        /// Path to the JSON config file
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,
        /// Repository name from the config; picked at random when omitted
        #[arg(short, long)]
        repo: Option<String>,
        /// Directory holding working copies (defaults to the current directory)
        #[arg(long)]
        base_dir: Option<PathBuf>,
    },
    /// Validate the config file and list its repository tasks
    #[clap(visible_alias = "v")]
    Validate {
        /// Path to the JSON config file
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Run { config, repo, base_dir } => {
            cadence::run(RunOptions { config, repo, base_dir }).map(report_outcome)
        }
        Commands::Validate { config } => cadence::validate(&config).map(|config| {
            println!("✅ Config OK: {} repository task(s)", config.repositories.len());
            for task in &config.repositories {
                println!(
                    "  - {} ({}, {}-{} commits)",
                    task.name,
                    task.window.display(),
                    task.commits.min,
                    task.commits.max
                );
            }
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn report_outcome(outcome: SessionOutcome) {
    match outcome {
        SessionOutcome::Completed { commits } => {
            println!("✅ Session complete: {} commit(s)", commits);
        }
        SessionOutcome::WindowMissed => {
            println!("Commit window already closed; nothing to do today.");
        }
        SessionOutcome::WindowClosed { completed } => {
            println!("Commit window closed early after {} commit(s).", completed);
        }
    }
}
