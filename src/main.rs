//! VCircuit - virtual circuit evaluation demo
//!
//! Builds one of the canned circuits, runs it for a number of ticks and
//! prints the graph state around every tick.
//!
//! # Usage
//!
//! ```bash
//! vcircuit gates
//! vcircuit wave --ticks 20 -vv
//! ```

use std::io;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vcircuit_core::{
    error::Result,
    scenarios::{run_scenario, Scenario, DEFAULT_TICKS},
};

/// Virtual circuit evaluator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Circuit to build and run
    #[arg(value_enum, default_value_t = Scenario::Gates)]
    scenario: Scenario,

    /// Number of propagation passes
    #[arg(short, long, default_value_t = DEFAULT_TICKS)]
    ticks: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let stdout = io::stdout();
    run_scenario(args.scenario, args.ticks, stdout.lock())?;

    Ok(())
}
