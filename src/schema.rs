//! Schema loading.
//!
//! A schema is a YAML document with a top-level `file` object:
//!
//! ```yaml
//! file:
//!   separator: "|"
//!   columns:
//!     - name: id
//!     - name: value
//!       type: float
//! ```
//!
//! The loader checks the document eagerly: the separator must be exactly one ASCII
//! character other than a line terminator or `"`, and column names must be unique. Any
//! problem is reported as [`PipelineError::SchemaFormat`]; no partial schema is ever returned.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{ColumnSpec, Schema, separator_byte};

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    file: Option<FileSection>,
}

#[derive(Debug, Deserialize)]
struct FileSection {
    separator: Option<String>,
    columns: Option<Vec<ColumnSpec>>,
}

/// Load and check a schema from a YAML file.
///
/// The file handle is dropped before this returns, on success and on error.
///
/// # Examples
///
/// ```no_run
/// use schema_gzip_ingest::schema::load_schema;
///
/// # fn main() -> Result<(), schema_gzip_ingest::PipelineError> {
/// let schema = load_schema("schema.yaml")?;
/// println!("separator={:?} columns={}", schema.separator, schema.columns.len());
/// # Ok(())
/// # }
/// ```
pub fn load_schema(path: impl AsRef<Path>) -> PipelineResult<Schema> {
    let path = path.as_ref();
    let file = File::open(path)?;
    schema_from_document(BufReader::new(file), Some(path.to_path_buf()))
}

/// Parse a schema from any reader producing a YAML document.
pub fn schema_from_reader<R: Read>(reader: R) -> PipelineResult<Schema> {
    schema_from_document(reader, None)
}

/// Parse a schema from an in-memory YAML string.
pub fn schema_from_str(input: &str) -> PipelineResult<Schema> {
    let doc: SchemaDocument =
        serde_yaml::from_str(input).map_err(|e| PipelineError::schema_format(None, e.to_string()))?;
    build_schema(doc, None)
}

fn schema_from_document<R: Read>(reader: R, path: Option<PathBuf>) -> PipelineResult<Schema> {
    let doc: SchemaDocument = serde_yaml::from_reader(reader)
        .map_err(|e| PipelineError::schema_format(path.clone(), e.to_string()))?;
    build_schema(doc, path)
}

fn build_schema(doc: SchemaDocument, path: Option<PathBuf>) -> PipelineResult<Schema> {
    let file = doc
        .file
        .ok_or_else(|| PipelineError::schema_format(path.clone(), "missing top-level 'file' object"))?;

    let raw_separator = file
        .separator
        .ok_or_else(|| PipelineError::schema_format(path.clone(), "missing 'file.separator'"))?;
    let separator = parse_separator(&raw_separator).map_err(|m| PipelineError::schema_format(path.clone(), m))?;

    let columns = file
        .columns
        .ok_or_else(|| PipelineError::schema_format(path.clone(), "missing 'file.columns'"))?;

    let mut seen: HashSet<&str> = HashSet::with_capacity(columns.len());
    for col in &columns {
        if !seen.insert(col.name.as_str()) {
            return Err(PipelineError::schema_format(
                path,
                format!("duplicate column name '{}'", col.name),
            ));
        }
    }

    Ok(Schema::new(separator, columns))
}

fn parse_separator(raw: &str) -> Result<char, String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err("separator must not be empty".to_string()),
        (Some(c), None) => separator_byte(c).map(|_| c),
        (Some(_), Some(_)) => Err(format!("separator '{raw}' must be a single character")),
    }
}
