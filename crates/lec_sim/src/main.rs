//! LEC season simulator CLI
//!
//! Project playoff and championship odds from the current standings.

mod config;
mod report;
mod roster;
mod state;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use lec_core::SimulationEngine;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::{Overrides, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "lec-sim", about = "LEC 2026 Versus Monte Carlo simulation", version, long_about = None)]
struct Cli {
    /// Log debug detail (per-trial summaries)
    #[arg(long, short = 'v', global = true, action = ArgAction::SetTrue, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true, action = ArgAction::SetTrue)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run Monte Carlo simulation
    Simulate {
        /// Path to current state JSON file
        #[arg(long, short = 's')]
        state: Option<PathBuf>,

        /// Number of simulations to run [default: 10000]
        #[arg(long = "simulations", short = 'n')]
        simulations: Option<usize>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Default win rate for all matchups [default: 0.5]
        #[arg(long, short = 'w')]
        win_rate: Option<f64>,

        /// TOML configuration file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output file path for results JSON
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Run trials on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// Show current standings
    Standings {
        /// Path to current state JSON file
        #[arg(long, short = 's')]
        state: PathBuf,
    },

    /// Show remaining schedule
    Schedule {
        /// Path to current state JSON file
        #[arg(long, short = 's')]
        state: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_simulate(
    state: Option<PathBuf>,
    config_path: Option<PathBuf>,
    overrides: Overrides,
    output: Option<PathBuf>,
) -> Result<()> {
    println!("LEC 2026 Versus Monte Carlo Simulation");
    println!("{}", "=".repeat(50));

    let mut config = match &config_path {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    config.apply_overrides(&overrides);

    let tournament = state::load_tournament(state.as_deref())?;
    println!(
        "Matches completed: {}",
        tournament.completed_round_robin_matches().count()
    );
    println!(
        "Matches remaining: {}",
        tournament.remaining_round_robin_matches().count()
    );

    let win_rates = config.win_rate_matrix(tournament.roster())?;
    println!("\nRunning {} simulations...", config.simulation.num_simulations);

    let engine = SimulationEngine::new(tournament, win_rates, config.simulation)
        .context("invalid simulation configuration")?;
    let results = engine.run()?;

    report::print_summary(&results);

    let saved = report::save_results(&results, output.as_deref())?;
    println!("\nResults saved to: {}", saved.display());
    Ok(())
}

fn cmd_standings(state: PathBuf) -> Result<()> {
    let tournament = state::load_tournament(Some(&state))?;
    print!("{}", report::format_standings(&tournament));
    Ok(())
}

fn cmd_schedule(state: Option<PathBuf>) -> Result<()> {
    let tournament = state::load_tournament(state.as_deref())?;
    print!("{}", report::format_schedule(&tournament));
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Simulate {
            state,
            simulations,
            seed,
            win_rate,
            config,
            output,
            sequential,
        } => {
            let overrides = Overrides {
                simulations,
                seed,
                win_rate,
                sequential,
            };
            cmd_simulate(state, config, overrides, output)
        }
        Commands::Standings { state } => cmd_standings(state),
        Commands::Schedule { state } => cmd_schedule(state),
    }
}
