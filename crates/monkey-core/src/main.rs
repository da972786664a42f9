//! Monkey Simulation
//!
//! Runs the monkey troop described by a notes file and prints each monkey's
//! inspection count and the resulting monkey business.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use monkey_core::config::DEFAULT_CONFIG_PATH;
use monkey_core::setup::load_troop;
use monkey_core::{EventLogger, NullSink, PrimeCache, SimulationConfig, Troop};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "monkey_sim")]
#[command(about = "Simulates monkeys throwing worry items around")]
struct Args {
    /// Notes file describing the monkeys
    notes: PathBuf,

    /// TOML configuration file (defaults to ./monkey.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of rounds to run (overrides config)
    #[arg(long)]
    rounds: Option<u64>,

    /// Do not divide worry by 3 after inspection
    #[arg(long)]
    no_relief: bool,

    /// Exclusive upper bound for the prime cache (overrides config)
    #[arg(long)]
    prime_limit: Option<u64>,

    /// Write one JSON line per inspection to this file
    #[arg(long)]
    events: Option<PathBuf>,

    /// Write the final troop snapshot as JSON to this file
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Log round progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Loads the config file (if any) and layers CLI flags on top.
    fn resolve_config(&self) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_file(path)?,
            None if default_path.is_file() => SimulationConfig::from_file(default_path)?,
            None => SimulationConfig::default(),
        };

        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if self.no_relief {
            config.relieve_after_inspect = false;
        }
        if let Some(limit) = self.prime_limit {
            config.prime_limit = limit;
        }
        if self.events.is_some() {
            config.events_path = self.events.clone();
        }
        if self.snapshot.is_some() {
            config.snapshot_path = self.snapshot.clone();
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.resolve_config()?;
    let primes = Arc::new(PrimeCache::new(config.prime_limit));

    let mut troop =
        load_troop(&args.notes, Arc::clone(&primes))?.with_relief(config.relieve_after_inspect);
    tracing::info!(
        rounds = config.rounds,
        relief = config.relieve_after_inspect,
        prime_limit = primes.limit(),
        "starting simulation"
    );

    match &config.events_path {
        Some(path) => {
            ensure_parent(path)?;
            let mut logger = EventLogger::new(path)?;
            troop.run_rounds_traced(config.rounds, &mut logger)?;
            logger.flush()?;
            tracing::info!(events = logger.event_count(), "wrote inspection trace");
        }
        None => troop.run_rounds_traced(config.rounds, &mut NullSink)?,
    }

    print_report(&troop)?;

    if let Some(path) = &config.snapshot_path {
        ensure_parent(path)?;
        fs::write(path, troop.snapshot().to_json()?)?;
    }

    Ok(())
}

fn print_report(troop: &Troop) -> Result<(), Box<dyn std::error::Error>> {
    println!("After round {}:", troop.round());
    for (id, inspections) in troop.inspection_counts() {
        println!("Monkey {} inspected items {} times.", id, inspections);
    }
    println!("Monkey business: {}", troop.monkey_business()?);
    Ok(())
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
