use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::ingestion::PipelineSeverity;

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type returned by every pipeline stage.
///
/// This is a single error enum shared by schema loading, table reading, validation, writing
/// and summary generation.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Underlying I/O error (e.g. permission denied, disk full).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text read or write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "polars_reader")]
    /// Error raised by the Polars reader backend (feature-gated behind `polars_reader`).
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// The schema document could not be parsed or is missing required fields.
    #[error("schema format error{}: {message}", display_path(.path))]
    SchemaFormat {
        path: Option<PathBuf>,
        message: String,
    },

    /// The table's column labels do not equal the schema's column names, in order.
    #[error("{message}")]
    Validation {
        message: String,
        mismatches: Vec<ColumnMismatch>,
    },

    /// The file does not exist.
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },
}

impl PipelineError {
    pub(crate) fn schema_format(path: Option<PathBuf>, message: impl Into<String>) -> Self {
        Self::SchemaFormat {
            path,
            message: message.into(),
        }
    }

    /// Severity used when reporting this error to a [`crate::ingestion::PipelineObserver`].
    pub fn severity(&self) -> PipelineSeverity {
        match self {
            PipelineError::Io(_) => PipelineSeverity::Critical,
            PipelineError::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => PipelineSeverity::Critical,
                _ => PipelineSeverity::Error,
            },
            #[cfg(feature = "polars_reader")]
            PipelineError::Polars(err) => match err {
                polars::error::PolarsError::IO { .. } => PipelineSeverity::Critical,
                _ => PipelineSeverity::Error,
            },
            PipelineError::SchemaFormat { .. } => PipelineSeverity::Error,
            PipelineError::Validation { .. } => PipelineSeverity::Error,
            PipelineError::NotFound { .. } => PipelineSeverity::Warning,
        }
    }
}

/// One position where the table's labels and the schema's names disagree.
///
/// `None` means the sequence has no entry at `position` (it is shorter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMismatch {
    /// Zero-based column position.
    pub position: usize,
    /// Name declared by the schema at this position.
    pub expected: Option<String>,
    /// Label found in the table at this position.
    pub actual: Option<String>,
}

impl fmt::Display for ColumnMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "position {}: expected {}, found {}",
            self.position,
            quoted_or_missing(self.expected.as_deref()),
            quoted_or_missing(self.actual.as_deref())
        )
    }
}

fn quoted_or_missing(v: Option<&str>) -> String {
    match v {
        Some(s) => format!("'{s}'"),
        None => "<none>".to_string(),
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" in {}", p.display()),
        None => String::new(),
    }
}
