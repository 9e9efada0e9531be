//! Table reading and pipeline observability.
//!
//! The pipeline never reads files itself. It asks a [`TableReader`] to materialize a file
//! into a [`crate::types::Table`]:
//!
//! - [`csv::CsvTableReader`]: the production reader (csv crate)
//! - [`polars::PolarsTableReader`]: an alternative backend (feature `polars_reader`), used for
//!   reader comparisons
//!
//! [`ReaderBackend`] selects one of them by name, which is what the pipeline options and the
//! CLI use.

pub mod csv;
pub mod observability;
#[cfg(feature = "polars_reader")]
pub mod polars;
mod reader;

pub use observability::{
    CompositeObserver, FileObserver, PipelineContext, PipelineObserver, PipelineSeverity, PipelineStage,
    StageStats, StdErrObserver,
};
pub use reader::{ReaderBackend, TableReader};
