//! Polars-backed reader (feature-gated behind `polars_reader`).
//!
//! Schema inference is disabled, so every column is read as a string column and cell text
//! reaches the [`Table`] unchanged (`007` stays `007`, `1.50` stays `1.50`). Empty cells
//! come back as nulls and are turned into empty strings.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvParseOptions, CsvReadOptions, DataFrame, DataType, SerReader};

use crate::error::PipelineResult;
use crate::types::Table;

use super::reader::TableReader;

/// Reads delimited text through Polars' CSV reader.
#[derive(Debug, Clone, Copy)]
pub struct PolarsTableReader {
    delimiter: u8,
}

impl Default for PolarsTableReader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl PolarsTableReader {
    /// Comma-delimited reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `delimiter` instead of a comma.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read the file into a Polars `DataFrame` of string columns.
    pub fn read_frame(&self, path: &Path) -> PipelineResult<DataFrame> {
        let file = File::open(path)?;
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_parse_options(CsvParseOptions::default().with_separator(self.delimiter))
            .into_reader_with_file_handle(file)
            .finish()?;
        Ok(df)
    }
}

impl TableReader for PolarsTableReader {
    fn name(&self) -> &'static str {
        "polars"
    }

    fn read_table(&self, path: &Path) -> PipelineResult<Table> {
        let df = self.read_frame(path)?;
        frame_to_table(&df)
    }
}

fn frame_to_table(df: &DataFrame) -> PipelineResult<Table> {
    let columns: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
    let mut rows: Vec<Vec<String>> = vec![Vec::with_capacity(columns.len()); df.height()];

    for column in df.columns() {
        let as_text = column.as_materialized_series().cast(&DataType::String)?;
        for (row, cell) in rows.iter_mut().zip(as_text.str()?.into_iter()) {
            row.push(cell.unwrap_or_default().to_owned());
        }
    }

    Ok(Table::new(columns, rows))
}
