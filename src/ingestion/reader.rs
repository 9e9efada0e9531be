use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::PipelineResult;
use crate::types::Table;

use super::csv::CsvTableReader;

/// Materializes a tabular file into an in-memory [`Table`].
///
/// Implementations must preserve the file's column order and must not rewrite labels or
/// cell text.
pub trait TableReader: Send + Sync {
    /// Short backend name used in logs and benchmark output.
    fn name(&self) -> &'static str;

    /// Read the whole file at `path`.
    fn read_table(&self, path: &Path) -> PipelineResult<Table>;
}

/// Available reader backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReaderBackend {
    /// [`CsvTableReader`] (default).
    #[default]
    Csv,
    /// [`super::polars::PolarsTableReader`] (feature-gated behind `polars_reader`).
    Polars,
}

impl ReaderBackend {
    /// All backends compiled into this build.
    pub fn available() -> Vec<Self> {
        let mut out = vec![Self::Csv];
        if cfg!(feature = "polars_reader") {
            out.push(Self::Polars);
        }
        out
    }

    /// Build a reader for this backend using `delimiter` for input parsing.
    pub fn reader(self, delimiter: u8) -> PipelineResult<Box<dyn TableReader>> {
        match self {
            Self::Csv => Ok(Box::new(CsvTableReader::new().with_delimiter(delimiter))),
            Self::Polars => polars_reader(delimiter),
        }
    }
}

#[cfg(feature = "polars_reader")]
fn polars_reader(delimiter: u8) -> PipelineResult<Box<dyn TableReader>> {
    Ok(Box::new(super::polars::PolarsTableReader::new().with_delimiter(delimiter)))
}

#[cfg(not(feature = "polars_reader"))]
fn polars_reader(_delimiter: u8) -> PipelineResult<Box<dyn TableReader>> {
    Err(crate::error::PipelineError::Io(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "polars reader not enabled (enable cargo feature 'polars_reader')",
    )))
}

impl fmt::Display for ReaderBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Polars => f.write_str("polars"),
        }
    }
}

impl FromStr for ReaderBackend {
    type Err = String;

    /// Parse a backend name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "polars" => Ok(Self::Polars),
            other => Err(format!("unknown reader backend '{other}' (expected csv or polars)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_round_trip_through_from_str() {
        for backend in [ReaderBackend::Csv, ReaderBackend::Polars] {
            assert_eq!(backend.to_string().parse::<ReaderBackend>().unwrap(), backend);
        }
        assert_eq!("CSV".parse::<ReaderBackend>().unwrap(), ReaderBackend::Csv);
        assert!("pandas".parse::<ReaderBackend>().is_err());
    }

    #[test]
    fn csv_backend_is_always_available() {
        assert_eq!(ReaderBackend::available()[0], ReaderBackend::Csv);
        assert_eq!(ReaderBackend::Csv.reader(b',').unwrap().name(), "csv");
    }
}
