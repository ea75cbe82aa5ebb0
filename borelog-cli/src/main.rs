//!
//! Headless inspection commands for borehole interval log datasets.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use borelog_core::{segment_blocks, ColumnRoles, IntervalIndex, NumericFallback};
use borelog_io::{load_table, scan_photo_dir};

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("Load error: {0}")]
    Load(#[from] borelog_io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Borehole log dataset inspector.
#[derive(Parser)]
#[command(name = "borelog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a table: row count, depth range, row warnings
    Info {
        /// Input table (JSON records)
        input: PathBuf,

        /// Categorical columns to inspect
        #[arg(short, long)]
        categorical: Vec<String>,

        /// Numeric columns to inspect
        #[arg(short, long)]
        numeric: Vec<String>,
    },

    /// Segment one categorical log into contiguous blocks
    Blocks {
        /// Input table (JSON records)
        input: PathBuf,

        /// Categorical column to segment
        #[arg(short, long)]
        log: String,

        /// Emit blocks as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List core photographs parsed from a directory
    Photos {
        /// Directory of `<start>-<end>.<ext>` files
        dir: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli.command) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Info {
            input,
            categorical,
            numeric,
        } => info(&input, categorical, numeric),
        Commands::Blocks { input, log, json } => blocks(&input, &log, json),
        Commands::Photos { dir } => photos(&dir),
    }
}

fn info(input: &PathBuf, categorical: Vec<String>, numeric: Vec<String>) -> Result<()> {
    let roles = ColumnRoles {
        categorical: categorical.clone(),
        numeric: numeric.clone(),
    };
    let table = load_table(input, roles)?;
    let index = IntervalIndex::from_table(&table);

    println!("Rows:       {}", table.len());
    println!("Depth:      0..{}", index.max_depth());
    for log in &categorical {
        let intervals = index.categorical_intervals(log);
        let blocks = segment_blocks(log, &intervals);
        println!(
            "Log {log}: {} labeled intervals, {} blocks",
            intervals.len(),
            blocks.len()
        );
    }
    for log in &numeric {
        let (points, warnings) = index.numeric_series(log, NumericFallback::Skip);
        println!(
            "Log {log}: {} points, {} unusable cells",
            points.len(),
            warnings.len()
        );
    }

    if index.warnings().is_empty() {
        println!("Warnings:   none");
    } else {
        println!("Warnings:   {}", index.warnings().len());
        for warning in index.warnings() {
            println!("  {warning}");
        }
    }
    Ok(())
}

fn blocks(input: &PathBuf, log: &str, json: bool) -> Result<()> {
    let roles = ColumnRoles {
        categorical: vec![log.to_string()],
        numeric: Vec::new(),
    };
    let table = load_table(input, roles)?;
    let index = IntervalIndex::from_table(&table);
    let blocks = segment_blocks(log, &index.categorical_intervals(log));

    if json {
        println!("{}", serde_json::to_string_pretty(&blocks)?);
    } else {
        for block in &blocks {
            println!("{:>8.2} {:>8.2}  {}", block.start, block.end, block.label);
        }
    }
    Ok(())
}

fn photos(dir: &PathBuf) -> Result<()> {
    let entries = scan_photo_dir(dir)?;
    for entry in &entries {
        println!(
            "{:>8.2} {:>8.2}  {}",
            entry.start,
            entry.end,
            entry.path.display()
        );
    }
    println!("{} photographs", entries.len());
    Ok(())
}
