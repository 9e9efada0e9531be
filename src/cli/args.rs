//! CLI argument definitions using clap
//!
//! Commands:
//! - schema-gzip-ingest run --input <file> --schema <yaml> --output <gz>
//! - schema-gzip-ingest summary --input <file>
//! - schema-gzip-ingest bench --input <file>
//! - schema-gzip-ingest size <bytes>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::ingestion::ReaderBackend;

/// Validate a delimited file against a YAML schema and write a gzip copy
#[derive(Parser, Debug)]
#[command(name = "schema-gzip-ingest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load schema, read, normalize, validate, write gzip output, then summarize the input
    Run {
        /// Path to the input table
        #[arg(long)]
        input: PathBuf,

        /// Path to the YAML schema
        #[arg(long)]
        schema: PathBuf,

        /// Path of the gzip output file
        #[arg(long, default_value = "output.txt.gz")]
        output: PathBuf,

        /// Reader backend (csv or polars)
        #[arg(long, default_value = "csv")]
        reader: ReaderBackend,

        /// Delimiter of the input file
        #[arg(long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,

        /// Gzip compression level
        #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(0..=9))]
        level: u32,

        /// Append pipeline events to this log file
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Do not print stage progress to stderr
        #[arg(long)]
        quiet: bool,
    },

    /// Print row count, column count and size of a file
    Summary {
        /// Path to the input table
        #[arg(long)]
        input: PathBuf,

        /// Delimiter of the input file
        #[arg(long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,

        /// Also print the size in human-readable units
        #[arg(long)]
        human: bool,

        /// Print the summary as JSON
        #[arg(long, conflicts_with = "human")]
        json: bool,
    },

    /// Time a full read of a file through every available reader backend
    Bench {
        /// Path to the input table
        #[arg(long)]
        input: PathBuf,

        /// Delimiter of the input file
        #[arg(long, default_value = ",", value_parser = parse_delimiter)]
        delimiter: u8,

        /// Reads per backend
        #[arg(long, default_value_t = 1)]
        iterations: usize,
    },

    /// Format a byte count in human-readable units
    Size {
        /// Number of bytes
        bytes: u64,

        /// Decimal places
        #[arg(long, default_value_t = 2)]
        precision: usize,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    let s = if s == "\\t" { "\t" } else { s };
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
    }
}
