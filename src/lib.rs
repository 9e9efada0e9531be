//! `schema-gzip-ingest` checks a delimited file against a declarative schema and writes a
//! gzip-compressed copy of it.
//!
//! The primary entrypoint is [`pipeline::run_pipeline`] (or [`pipeline::PipelineRequest`]),
//! which runs these stages in order:
//!
//! 1. [`schema::load_schema`]: parse the YAML schema (output separator + ordered columns)
//! 2. [`ingestion::TableReader::read_table`]: read the input into a [`types::Table`]
//! 3. [`processing::normalize_columns`]: strip non-word characters and whitespace from labels
//! 4. [`processing::validate_columns`]: labels must equal the schema's columns, in order
//! 5. [`writer::write_compressed`]: gzip delimited output using the schema's separator
//! 6. [`summary::summarize`]: row/column/byte counts of the original input file
//!
//! Schema, read, validation and write failures abort the run. A failed summary is reported to
//! the configured [`ingestion::PipelineObserver`] and leaves the run successful.
//!
//! ## Schema format
//!
//! ```yaml
//! file:
//!   separator: "|"
//!   columns:
//!     - name: id
//!     - name: value
//! ```
//!
//! ## Quick example
//!
//! ```no_run
//! use schema_gzip_ingest::pipeline::PipelineRequest;
//!
//! # fn main() -> Result<(), schema_gzip_ingest::PipelineError> {
//! let report = PipelineRequest::new("training_data.csv", "schema.yaml", "output.txt.gz").run()?;
//! println!("rows written={}", report.rows_written);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`schema`]: schema loading and checks
//! - [`ingestion`]: table readers and observability
//! - [`processing`]: column normalization and validation
//! - [`writer`]: gzip delimited output
//! - [`summary`]: file statistics and human-readable sizes
//! - [`pipeline`]: end-to-end orchestration
//! - [`benchmark`]: reader backend timing
//! - [`types`]: schema, table and summary types
//! - [`error`]: error types used across the crate

pub mod benchmark;
pub mod cli;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod schema;
pub mod summary;
pub mod types;
pub mod writer;

pub use error::{ColumnMismatch, PipelineError, PipelineResult};
