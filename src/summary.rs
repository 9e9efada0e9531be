//! Source file statistics.
//!
//! [`summarize`] re-reads the source file from disk. It never looks at the table used in the
//! write path, so its counts describe the original file rather than the written output.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::ingestion::TableReader;
use crate::ingestion::csv::CsvTableReader;
use crate::types::FileSummary;

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Count rows and columns of the comma-delimited file at `path` and look up its size.
///
/// Returns [`PipelineError::NotFound`] if the file does not exist.
pub fn summarize(path: impl AsRef<Path>) -> PipelineResult<FileSummary> {
    summarize_with(&CsvTableReader::new(), path)
}

/// Like [`summarize`], reading the file through `reader`.
pub fn summarize_with(reader: &dyn TableReader, path: impl AsRef<Path>) -> PipelineResult<FileSummary> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).map_err(|e| not_found_or_io(path, e))?;
    let table = reader.read_table(path).map_err(|e| match e {
        PipelineError::Io(io) => not_found_or_io(path, io),
        other => other,
    })?;

    Ok(FileSummary {
        row_count: table.row_count(),
        column_count: table.column_count(),
        byte_size: metadata.len(),
    })
}

fn not_found_or_io(path: &Path, e: io::Error) -> PipelineError {
    if e.kind() == io::ErrorKind::NotFound {
        PipelineError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        PipelineError::Io(e)
    }
}

/// Size of the file at `path` in bytes, or `None` if it cannot be determined.
///
/// The OS error is printed to stderr; callers treat a missing size as informational.
pub fn file_size(path: impl AsRef<Path>) -> Option<u64> {
    match fs::metadata(path.as_ref()) {
        Ok(m) => Some(m.len()),
        Err(e) => {
            eprintln!("[summary] cannot read size of {}: {e}", path.as_ref().display());
            None
        }
    }
}

/// Format a byte count with two decimal places, e.g. `2048` → `"2.00 KB"`.
pub fn human_readable_size(bytes: u64) -> String {
    human_readable_size_with_precision(bytes, 2)
}

/// Format a byte count using 1024-based units from `B` up to `PB`.
///
/// Values of 1024 PB or more stay in `PB`.
pub fn human_readable_size_with_precision(bytes: u64, decimal_places: usize) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.decimal_places$} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_unit() {
        assert_eq!(human_readable_size(0), "0.00 B");
        assert_eq!(human_readable_size(1023), "1023.00 B");
        assert_eq!(human_readable_size(1024), "1.00 KB");
        assert_eq!(human_readable_size(2048), "2.00 KB");
        assert_eq!(human_readable_size(1536 * 1024), "1.50 MB");
        assert_eq!(human_readable_size(1 << 30), "1.00 GB");
        assert_eq!(human_readable_size(1 << 40), "1.00 TB");
        assert_eq!(human_readable_size(1 << 50), "1.00 PB");
    }

    #[test]
    fn clamps_past_petabytes() {
        assert_eq!(human_readable_size(1 << 60), "1024.00 PB");
        assert!(human_readable_size(u64::MAX).ends_with(" PB"));
    }

    #[test]
    fn honors_decimal_places() {
        assert_eq!(human_readable_size_with_precision(1536, 0), "2 KB");
        assert_eq!(human_readable_size_with_precision(1536, 3), "1.500 KB");
    }

    #[test]
    fn missing_file_has_no_size() {
        assert_eq!(file_size("definitely/does/not/exist.csv"), None);
    }

    #[test]
    fn missing_file_summary_is_not_found() {
        let err = summarize("missing.csv").unwrap_err();
        assert!(matches!(err, PipelineError::NotFound { .. }));
    }
}
