//! Core data model types for the pipeline.
//!
//! A [`Schema`] is loaded once per run and read by the validator and writer. A [`Table`] is
//! produced by a [`crate::ingestion::TableReader`] and flows through normalization,
//! validation and writing. [`FileSummary`] is computed independently from the source file.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// A single column descriptor in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Expected (normalized) column name.
    pub name: String,
    /// Optional declared type. Kept as metadata; it is not enforced.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
}

impl ColumnSpec {
    /// Create a column descriptor with no declared type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
        }
    }
}

/// Expected shape of the input plus the output delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    /// Delimiter used when writing the output file.
    pub separator: char,
    /// Ordered column descriptors. Order defines the expected input column order.
    pub columns: Vec<ColumnSpec>,
}

impl Schema {
    /// Create a schema from a separator and ordered columns.
    ///
    /// This does not check the separator or name uniqueness; see
    /// [`crate::schema::schema_from_str`] for the checked path.
    pub fn new(separator: char, columns: Vec<ColumnSpec>) -> Self {
        Self { separator, columns }
    }

    /// Iterate column names in declared order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// The separator as a single byte, for the delimited writer.
    ///
    /// Fails with [`PipelineError::SchemaFormat`] for separators the writer cannot round-trip:
    /// non-ASCII characters, line terminators and the quote character.
    pub fn separator_byte(&self) -> PipelineResult<u8> {
        separator_byte(self.separator).map_err(|m| PipelineError::schema_format(None, m))
    }
}

pub(crate) fn separator_byte(c: char) -> Result<u8, String> {
    match c {
        '\n' | '\r' => Err(format!("separator {c:?} must not be a line terminator")),
        '"' => Err("separator must not be the quote character '\"'".to_string()),
        c if c.is_ascii() => Ok(c as u8),
        c => Err(format!("separator '{c}' must be an ASCII character")),
    }
}

/// In-memory tabular dataset with text cells.
///
/// Rows are stored as `Vec<Vec<String>>` in the same order as `columns`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// Ordered column labels.
    pub columns: Vec<String>,
    /// Row-major cell storage.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from column labels and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Iterate column labels in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }
}

/// Row count, column count and byte size of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    /// Number of data rows (header excluded).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// File size on disk in bytes.
    pub byte_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_byte_accepts_plain_ascii() {
        for c in [',', '|', ';', '\t'] {
            assert_eq!(Schema::new(c, Vec::new()).separator_byte().unwrap(), c as u8);
        }
    }

    #[test]
    fn separator_byte_rejects_unwritable_separators() {
        for c in ['\n', '\r', '"', '§', '✓'] {
            let err = Schema::new(c, Vec::new()).separator_byte().unwrap_err();
            assert!(matches!(err, PipelineError::SchemaFormat { .. }), "{c:?} accepted");
        }
    }
}
