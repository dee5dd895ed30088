//! Headless skirmish runner.
//!
//! Runs mirrored agent-vs-agent matches without a host, printing a
//! JSON match report on stdout. Logs go to stderr so the report stays
//! machine-readable.
//!
//! # Usage
//!
//! ```bash
//! # Run one skirmish with defaults (12x12, 600 ticks)
//! cargo run -p gridbot_headless -- run
//!
//! # Bigger map, longer match, verbose logs
//! cargo run -p gridbot_headless -- run --width 16 --height 16 --ticks 2000 -v
//!
//! # Load unit types from a RON catalog instead of the built-in one
//! cargo run -p gridbot_headless -- run --catalog data/types.ron
//!
//! # Time raw planning throughput on a fixed position
//! cargo run -p gridbot_headless -- benchmark --ticks 10000
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gridbot_core::prelude::*;
use gridbot_headless::{Skirmish, SkirmishConfig};

#[derive(Parser)]
#[command(name = "gridbot_headless")]
#[command(about = "Headless skirmish runner for agent testing and CI")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single mirrored skirmish
    Run {
        /// Map width in cells
        #[arg(long, default_value = "12")]
        width: i32,

        /// Map height in cells
        #[arg(long, default_value = "12")]
        height: i32,

        /// Tick limit
        #[arg(short, long, default_value = "600")]
        ticks: u64,

        /// RON unit type catalog (defaults to the built-in catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Time raw planning throughput on a fixed position
    Benchmark {
        /// Number of planning calls
        #[arg(short, long, default_value = "10000")]
        ticks: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs to stderr; stdout carries the JSON report.
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Some(Commands::Run {
            width,
            height,
            ticks,
            catalog,
        }) => cmd_run(width, height, ticks, catalog),
        Some(Commands::Benchmark { ticks }) => cmd_benchmark(ticks),
        None => cmd_run(12, 12, 600, None),
    }
}

fn load_catalog(path: Option<PathBuf>) -> UnitTypeCatalog {
    match path {
        Some(p) => match UnitTypeCatalog::load(&p) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load catalog '{}': {}", p.display(), e);
                std::process::exit(1);
            }
        },
        None => UnitTypeCatalog::standard(),
    }
}

fn cmd_run(width: i32, height: i32, ticks: u64, catalog: Option<PathBuf>) {
    let config = SkirmishConfig {
        width,
        height,
        max_ticks: ticks,
    };

    let mut skirmish = match Skirmish::new(config, load_catalog(catalog)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to set up skirmish: {}", e);
            std::process::exit(1);
        }
    };

    let report = skirmish.run();

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize report: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_benchmark(ticks: u64) {
    use std::time::Instant;

    let skirmish = match Skirmish::new(SkirmishConfig::default(), UnitTypeCatalog::standard()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to set up benchmark: {}", e);
            std::process::exit(1);
        }
    };
    let snapshot = skirmish.snapshot();
    let mut agent = match Agent::new(UnitTypeCatalog::standard()) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Failed to create agent: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Running {} planning calls", ticks);

    // Warmup
    for _ in 0..100 {
        let _ = agent.get_action(PlayerId(0), &snapshot);
    }

    let start = Instant::now();
    for _ in 0..ticks {
        let _ = agent.get_action(PlayerId(0), &snapshot);
    }
    let elapsed = start.elapsed();

    let tps = ticks as f64 / elapsed.as_secs_f64();
    eprintln!("Planning calls: {}", ticks);
    eprintln!("Duration: {:.3}s", elapsed.as_secs_f64());
    eprintln!("Calls/second: {:.1}", tps);
    eprintln!("ms/call: {:.4}", elapsed.as_millis() as f64 / ticks as f64);
}
