//! Hatchery simulator console entry point.
mod prompt;
mod report;
mod session;

use anyhow::{bail, Context, Result};
use clap::Parser;
use hatchery_simulator_core::{HatcheryConfig, Orchestrator};
use prompt::Prompter;
use session::{Session, SessionEnd};
use std::io;
use std::path::{Path, PathBuf};

/// Quarterly fish hatchery simulation
#[derive(Parser)]
#[command(name = "hatchery")]
#[command(about = "Run the fish hatchery simulation", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of quarters to simulate (prompted if omitted)
    #[arg(long)]
    quarters: Option<u32>,

    /// JSON configuration file; built-in defaults if omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also print each period report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let mut config = load_config(cli.config.as_deref())?;

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    config.num_quarters = match cli.quarters {
        Some(0) => bail!("--quarters must be a positive number"),
        Some(quarters) => quarters,
        None => prompter.ask_positive("Please enter number of quarters: ")?,
    };

    let mut orchestrator = Orchestrator::new(config).context("invalid configuration")?;
    let end = Session::new(&mut orchestrator, &mut prompter, cli.json).run()?;

    tracing::info!(
        ?end,
        quarters = orchestrator.current_period(),
        cash = orchestrator.state().cash(),
        "simulation finished"
    );
    if end == SessionEnd::Completed {
        prompter.say(&format!(
            "Simulation complete. Final cash balance: {}",
            report::money(orchestrator.state().cash())
        ))?;
    }
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`)
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<HatcheryConfig> {
    let Some(path) = path else {
        return Ok(HatcheryConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}
