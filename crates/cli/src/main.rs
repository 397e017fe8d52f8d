//! Cache simulator CLI.
//!
//! This binary drives the cache model over an access trace. It performs:
//! 1. **Run:** Load configuration, memory image and trace; simulate; flush; report hit rates.
//! 2. **Defaults:** Print the default configuration as JSON, as a starting point for `--config`.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cachesim_core::config::{Config, PolicyMode};
use cachesim_core::memory::BackingStore;
use cachesim_core::sim::loader;
use cachesim_core::{Simulator, common::SimError};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Set-associative cache simulator comparing LRU and pseudo-LRU",
    long_about = "Replays a memory access trace through a 4-way set-associative write-back cache \
                  under true LRU and pseudo-LRU replacement, then reports each policy's hit rate.\n\n\
                  Examples:\n  cachesim run -t trace.txt\n  cachesim run -t trace.json --mode lru\n  \
                  cachesim run -t trace.txt --config cache.json --dump-memory mem.bin"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). Overridden by RUST_LOG.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a trace and print hit rates.
    Run {
        /// Access trace (text, or JSON when the extension is .json).
        #[arg(short, long)]
        trace: PathBuf,

        /// Policies to simulate: both, lru, plru (or 0, 1, 2).
        #[arg(short, long, alias = "replacement")]
        mode: Option<String>,

        /// JSON configuration file; defaults are used for missing fields.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Raw binary copied to address 0 before the run.
        #[arg(long)]
        memory_image: Option<PathBuf>,

        /// Write the memory contents here after the final flush.
        #[arg(long)]
        dump_memory: Option<PathBuf>,

        /// Print statistics as JSON instead of the text report.
        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration as JSON.
    Defaults,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            trace,
            mode,
            config,
            memory_image,
            dump_memory,
            json,
        } => cmd_run(&RunArgs {
            trace,
            mode,
            config,
            memory_image,
            dump_memory,
            json,
        }),
        Commands::Defaults => cmd_defaults(),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber; stdout carries only the report.
fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct RunArgs {
    trace: PathBuf,
    mode: Option<String>,
    config: Option<PathBuf>,
    memory_image: Option<PathBuf>,
    dump_memory: Option<PathBuf>,
    json: bool,
}

/// Any failure of a subcommand; `main` prints it and exits with status 1.
type CliResult = Result<(), Box<dyn Error>>;

/// Runs one simulation: configure, seed memory, replay the trace, flush, report.
fn cmd_run(args: &RunArgs) -> CliResult {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(mode) = &args.mode {
        config.mode = mode.parse::<PolicyMode>()?;
    }
    let _ = config.validate()?;
    info!(mode = %config.mode, "configuration loaded");

    let memory = match &args.memory_image {
        Some(path) => loader::load_memory_image(path, config.memory.size_bytes)?,
        None => BackingStore::new(config.memory.size_bytes),
    };
    let mut sim = Simulator::with_memory(&config, memory)?;

    let events = loader::load_trace(&args.trace)?;
    let _ = sim.run(&events)?;
    let written = sim.flush();
    debug!(written, "final flush");

    if let Some(path) = &args.dump_memory {
        dump(path, &sim)?;
    }

    if args.json {
        let summary = sim.stats().summary(sim.mode());
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        sim.stats().print(sim.mode());
    }
    Ok(())
}

fn dump(path: &Path, sim: &Simulator) -> Result<(), SimError> {
    loader::dump_memory(path, sim.memory())?;
    info!(path = %path.display(), "memory dumped");
    Ok(())
}

fn cmd_defaults() -> CliResult {
    println!("{}", serde_json::to_string_pretty(&Config::default())?);
    Ok(())
}
