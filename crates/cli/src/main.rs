//! Headless battle simulator.
//!
//! Loads battle content from a data directory, fights one troop with the
//! party and prints the report.
//!
//! ```bash
//! battle-sim list --content crates/battle/content/data
//! battle-sim run --troop 3 --seed 42 --json
//! ```

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{List, Run};

/// Headless ATB battle simulator
#[derive(Parser)]
#[command(name = "battle-sim")]
#[command(about = "Run battles from data files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Fight one troop and print the report
    Run(Run),

    /// List the troops available in a content directory
    List(List),
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(cmd) => cmd.execute().await,
        Command::List(cmd) => cmd.execute(),
    }
}

/// Logs go to stderr so `--json` output stays clean on stdout.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
