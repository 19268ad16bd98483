//! Command-line front end for the queueing simulator.
//!
//! ```bash
//! # Text configuration: `K,H,N,R,P` header then one line per category
//! qsim config.txt
//!
//! # Override the policy and emit JSON
//! qsim config.json --policy least-loaded --json
//! ```

mod report;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use qsim_core::{NoTrace, PolicyKind, SimConfig, Simulator};
use tracing::info;
use tracing_subscriber::EnvFilter;

use report::{summary_lines, LineTrace};

/// Multi-server queueing simulator
///
/// Runs R independent simulations of K servers fed by H job categories with
/// exponential interarrival and service times, and prints averaged results.
#[derive(Parser, Debug)]
#[command(name = "qsim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file (text form, or JSON when the extension is .json)
    config: PathBuf,

    /// Override the number of runs
    #[arg(short = 'r', long)]
    runs: Option<u32>,

    /// Override the assignment policy (round-robin or least-loaded)
    #[arg(short = 'p', long)]
    policy: Option<PolicyKind>,

    /// Print aggregate statistics as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = SimConfig::from_path(&args.config)?;
    if let Some(runs) = args.runs {
        config.runs = runs;
    }
    if let Some(policy) = args.policy {
        config.policy = policy;
    }

    let mut simulator = Simulator::new(&config)?;
    info!(
        servers = config.servers,
        categories = config.category_count(),
        max_jobs = config.max_jobs,
        runs = config.runs,
        policy = %config.policy,
        "starting simulation"
    );

    let stdout = io::stdout();
    if args.json {
        let stats = simulator.run(&mut NoTrace);
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &stats)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(stdout.lock(), "{}", config.header_line())?;
    let stats = simulator.run(&mut LineTrace::new(stdout.lock()));
    let mut out = stdout.lock();
    for line in summary_lines(&stats) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
