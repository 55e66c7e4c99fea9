//! Cycle-accurate cache simulator CLI.
//!
//! This binary runs one simulation per invocation. It performs:
//! 1. **Configuration:** Builds a `SimConfig` from flags and validates it before any work.
//! 2. **Workload:** Loads requests from a CSV file, or uses the built-in matrix
//!    multiplication (`--matmul`) and checks every value it reads.
//! 3. **Tracing:** Optionally writes a VCD waveform of the engine signals (`--tf`).
//! 4. **Reporting:** Prints the result as a text report or as JSON (`--json`).
//!
//! Log verbosity follows `RUST_LOG` (for example `RUST_LOG=cachesim_core=debug`).

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cachesim_core::common::SimError;
use cachesim_core::config::{CacheOrganization, SimConfig};
use cachesim_core::sim::loader;
use cachesim_core::sim::trace::VcdTracer;
use cachesim_core::sim::Simulator;
use cachesim_core::sim::workload::Workload;
use cachesim_core::stats::SimResult;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Cycle-accurate cache simulator",
    long_about = "Simulate a direct-mapped or four-way LRU cache in front of main memory and \
                  count the cycles, hits, and misses of a request stream.\n\nExamples:\n  \
                  cachesim --directmapped -c 200 requests.csv\n  \
                  cachesim --fourway --cachelines 16 --tf run.vcd requests.csv\n  \
                  cachesim --fourway --matmul --json"
)]
#[command(group(
    ArgGroup::new("organization")
        .required(true)
        .args(["directmapped", "fourway"])
))]
struct Cli {
    /// Maximum number of cycles to simulate.
    #[arg(short = 'c', long, default_value_t = 1000)]
    cycles: usize,

    /// Use a direct-mapped cache.
    #[arg(long)]
    directmapped: bool,

    /// Use a four-way set-associative cache with LRU replacement.
    #[arg(long)]
    fourway: bool,

    /// Cache line size in bytes (a multiple of 4).
    #[arg(long = "cacheline-size", default_value_t = 8)]
    cacheline_size: u32,

    /// Total number of cache lines.
    #[arg(long, default_value_t = 8)]
    cachelines: u32,

    /// Cycles spent before every cache access.
    #[arg(long = "cache-latency", default_value_t = 2)]
    cache_latency: u32,

    /// Additional cycles spent on a miss.
    #[arg(long = "memory-latency", default_value_t = 3)]
    memory_latency: u32,

    /// Write a VCD waveform trace to this file.
    #[arg(long = "tf", value_name = "FILE")]
    trace_file: Option<PathBuf>,

    /// Print the result as JSON instead of a text report.
    #[arg(long)]
    json: bool,

    /// Run the built-in matrix-multiplication workload instead of a request file.
    #[arg(long, conflicts_with = "requests")]
    matmul: bool,

    /// CSV request file (`R,<hex addr>,<data>` or `W,<hex addr>,<data>` per line).
    #[arg(required_unless_present = "matmul")]
    requests: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> SimConfig {
        SimConfig {
            cycles: self.cycles,
            policy: if self.fourway {
                CacheOrganization::FourWay
            } else {
                CacheOrganization::DirectMapped
            },
            cache_lines: self.cachelines,
            cache_line_size: self.cacheline_size,
            cache_latency: self.cache_latency,
            memory_latency: self.memory_latency,
        }
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(Outcome { result, verified }) => {
            if cli.json {
                match result.to_json() {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        process::exit(1);
                    }
                }
            } else {
                result.print();
            }
            if verified == Some(false) {
                eprintln!("Matrix multiplication produced wrong values");
                process::exit(2);
            }
        }
        Err(e) => {
            error!(%e, "simulation aborted");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// What a run produced.
struct Outcome {
    result: SimResult,
    /// Workload check result; `None` when no check was run.
    verified: Option<bool>,
}

/// Validates the configuration, runs the selected workload, and checks it if applicable.
fn run(cli: &Cli) -> Result<Outcome, SimError> {
    let config = cli.config();
    config.validate()?;

    let (requests, mut checker) = if cli.matmul {
        let workload = Workload::matrix_multiplication();
        let checker = workload.checker();
        (workload.requests, Some(checker))
    } else if let Some(path) = &cli.requests {
        (loader::load_requests(path)?, None)
    } else {
        (Vec::new(), None)
    };
    info!(
        requests = requests.len(),
        policy = ?config.policy,
        "starting simulation"
    );

    let mut sim = Simulator::new(&config)?;
    let mut tracer = match &cli.trace_file {
        Some(path) => Some(VcdTracer::new(BufWriter::new(File::create(path)?))?),
        None => None,
    };

    let result = {
        let mut observers = (tracer.as_mut(), checker.as_mut());
        sim.run_observed(&requests, &mut observers)?
    };

    if let Some(tracer) = tracer {
        let _ = tracer.finish()?;
    }

    let verified = checker.as_mut().map(|checker| {
        let complete = checker.completed() == requests.len();
        let memory_ok = complete && checker.verify_memory(sim.engine().memory());
        for mismatch in checker.mismatches() {
            eprintln!("mismatch: {mismatch}");
        }
        complete && memory_ok && checker.mismatches().is_empty()
    });

    Ok(Outcome { result, verified })
}
