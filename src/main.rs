//! Command-line frontend: loads a pattern, runs it, and prints the result.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, LevelFilter};
use simple_logger::SimpleLogger;
use std::path::PathBuf;

use blocklife::config::{DEFAULT_DEPTH, DEFAULT_GRID_SIZE};
use blocklife::prelude::*;

/// Simulate Conway's Game of Life on a grid of nested blocks.
#[derive(Parser, Debug)]
#[command(name = "blocklife", version)]
struct Cli {
    /// Number of cells along each side of every block.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: usize,

    /// Number of layers of blocks.
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,

    /// Maximum number of generations to simulate.
    #[arg(short, long, default_value_t = 1)]
    generations: u64,

    /// Increase log verbosity (may be repeated).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// RLE pattern to load, placed at the upper-left corner of the grid
    /// unless it has a CXRLE position.
    pattern: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("Unable to initialize logger")?;
    info!("Starting blocklife v{} ...", env!("CARGO_PKG_VERSION"));

    let config = UniverseConfig {
        grid_size: cli.grid_size,
        depth: cli.depth,
    };
    let mut universe = Universe::new(&config).context("Invalid universe configuration")?;

    if let Some(path) = &cli.pattern {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read {}", path.display()))?;
        let rle: Rle = contents
            .parse()
            .with_context(|| format!("Unable to parse {}", path.display()))?;
        debug!(
            "Loaded {}x{} pattern with {} live cells from {}",
            rle.width(),
            rle.height(),
            rle.population(),
            path.display(),
        );
        let memento = rle
            .to_memento()
            .with_context(|| format!("Unable to place {}", path.display()))?;
        universe.load(&memento);
    }

    let simulated = universe.run(cli.generations);
    info!(
        "Simulated {} generations; population is {}",
        simulated,
        universe.population(),
    );

    let rle = Rle::from_memento(&universe.store()).with_generation(universe.generation());
    print!("{}", rle);
    Ok(())
}
