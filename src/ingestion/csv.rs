//! CSV reader implementation.

use std::path::Path;

use crate::error::PipelineResult;
use crate::types::Table;

use super::reader::TableReader;

/// Reads delimited text into a [`Table`] using the `csv` crate.
///
/// Rules:
///
/// - The first record is the header row.
/// - Every record must have the same number of fields as the header.
/// - Cells are kept verbatim (no trimming, no type parsing).
/// - Input must be valid UTF-8.
#[derive(Debug, Clone, Copy)]
pub struct CsvTableReader {
    delimiter: u8,
}

impl Default for CsvTableReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvTableReader {
    /// Comma-delimited reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `delimiter` instead of a comma.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Input delimiter.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder.has_headers(true).delimiter(self.delimiter);
        builder
    }
}

impl TableReader for CsvTableReader {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn read_table(&self, path: &Path) -> PipelineResult<Table> {
        let mut rdr = self.builder().from_path(path)?;
        read_table_from_reader(&mut rdr)
    }
}

/// Read a [`Table`] from an existing CSV reader.
pub fn read_table_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> PipelineResult<Table> {
    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_owned).collect());
    }

    Ok(Table::new(columns, rows))
}

/// Read a [`Table`] from an in-memory string.
pub fn read_table_from_str(input: &str, delimiter: u8) -> PipelineResult<Table> {
    let mut rdr = CsvTableReader::new()
        .with_delimiter(delimiter)
        .builder()
        .from_reader(input.as_bytes());
    read_table_from_reader(&mut rdr)
}
