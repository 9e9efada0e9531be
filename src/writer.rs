//! Gzip-compressed delimited output.
//!
//! The output is UTF-8 delimited text with a header row of column labels, compressed as a
//! single gzip member. The file is created (or truncated) in place; if serialization fails
//! part-way, a partial file may remain on disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::error::PipelineResult;
use crate::types::Table;

/// Write `table` to `output_path` as gzip-compressed text delimited by `separator`.
///
/// Uses the default gzip compression level. See [`write_compressed_with_level`].
///
/// # Examples
///
/// ```no_run
/// use schema_gzip_ingest::types::Table;
/// use schema_gzip_ingest::writer::write_compressed;
///
/// # fn main() -> Result<(), schema_gzip_ingest::PipelineError> {
/// let table = Table::new(
///     vec!["id".to_string(), "value".to_string()],
///     vec![vec!["1".to_string(), "10.5".to_string()]],
/// );
/// write_compressed(&table, "output.txt.gz", b'|')?;
/// # Ok(())
/// # }
/// ```
pub fn write_compressed(table: &Table, output_path: impl AsRef<Path>, separator: u8) -> PipelineResult<()> {
    write_compressed_with_level(table, output_path, separator, Compression::default())
}

/// Like [`write_compressed`], with an explicit compression level.
pub fn write_compressed_with_level(
    table: &Table,
    output_path: impl AsRef<Path>,
    separator: u8,
    level: Compression,
) -> PipelineResult<()> {
    let file = File::create(output_path)?;
    let encoder = GzEncoder::new(BufWriter::new(file), level);
    let encoder = write_delimited(table, encoder, separator)?;
    let mut out = encoder.finish()?;
    out.flush()?;
    Ok(())
}

/// Serialize `table` as delimited text into `writer` and return the writer, flushed.
///
/// A table with no columns produces no output at all (not even a header line).
pub fn write_delimited<W: Write>(table: &Table, writer: W, separator: u8) -> PipelineResult<W> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(separator)
        .has_headers(false)
        .from_writer(writer);

    if table.column_count() > 0 {
        wtr.write_record(&table.columns)?;
        for row in &table.rows {
            wtr.write_record(row)?;
        }
    }

    wtr.flush()?;
    wtr.into_inner().map_err(|e| e.into_error().into())
}
