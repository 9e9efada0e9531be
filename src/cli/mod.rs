//! Command-line interface.
//!
//! `main.rs` only calls [`run`]; argument parsing and dispatch live here.

mod args;

use std::sync::Arc;

pub use args::{Cli, Command};

use crate::benchmark::benchmark_readers;
use crate::error::PipelineResult;
use crate::ingestion::csv::CsvTableReader;
use crate::ingestion::{CompositeObserver, FileObserver, PipelineObserver, ReaderBackend, StdErrObserver};
use crate::pipeline::{PipelineOptions, PipelineRequest};
use crate::summary::{human_readable_size, human_readable_size_with_precision, summarize_with};
use crate::types::FileSummary;

/// Parse arguments from the process and execute the selected command.
pub fn run() -> PipelineResult<()> {
    execute(Cli::parse_args())
}

/// Execute an already-parsed command line.
pub fn execute(cli: Cli) -> PipelineResult<()> {
    match cli.command {
        Command::Run {
            input,
            schema,
            output,
            reader,
            delimiter,
            level,
            log_file,
            quiet,
        } => {
            let mut observers: Vec<Arc<dyn PipelineObserver>> = Vec::new();
            if !quiet {
                observers.push(Arc::new(StdErrObserver));
            }
            if let Some(path) = log_file {
                observers.push(Arc::new(FileObserver::new(path)));
            }

            let options = PipelineOptions {
                reader,
                input_delimiter: delimiter,
                compression_level: level,
                observer: (!observers.is_empty())
                    .then(|| Arc::new(CompositeObserver::new(observers)) as Arc<dyn PipelineObserver>),
                ..Default::default()
            };

            let report = PipelineRequest::new(&input, &schema, &output).with_options(options).run()?;
            println!("wrote {} rows to {}", report.rows_written, output.display());
            match report.summary {
                Some(summary) => print_summary(&summary, true),
                None => println!("summary unavailable for {}", input.display()),
            }
            Ok(())
        }
        Command::Summary {
            input,
            delimiter,
            human,
            json,
        } => {
            let summary = summarize_with(&CsvTableReader::new().with_delimiter(delimiter), &input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary).map_err(std::io::Error::other)?);
            } else {
                print_summary(&summary, human);
            }
            Ok(())
        }
        Command::Bench {
            input,
            delimiter,
            iterations,
        } => {
            for timing in benchmark_readers(&input, &ReaderBackend::available(), delimiter, iterations)? {
                println!("{timing}");
            }
            Ok(())
        }
        Command::Size { bytes, precision } => {
            println!("{}", human_readable_size_with_precision(bytes, precision));
            Ok(())
        }
    }
}

fn print_summary(summary: &FileSummary, human: bool) {
    println!("Total number of rows: {}", summary.row_count);
    println!("Total number of columns: {}", summary.column_count);
    if human {
        println!(
            "File size: {} bytes ({})",
            summary.byte_size,
            human_readable_size(summary.byte_size)
        );
    } else {
        println!("File size: {} bytes", summary.byte_size);
    }
}
