//! End-to-end pipeline: load schema → read → normalize → validate → write → summarize.
//!
//! Every path is passed in by the caller through [`PipelineRequest`]. Stages run in order and
//! each completes before the next begins. Schema, read, validation and write failures abort
//! the run, and nothing is written after a validation failure. The summary stage is
//! informational: if it fails, the failure is reported to the observer and the run still
//! succeeds with [`PipelineReport::summary`] set to `None`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flate2::Compression;

use crate::error::{PipelineError, PipelineResult};
use crate::ingestion::{
    PipelineContext, PipelineObserver, PipelineSeverity, PipelineStage, ReaderBackend, StageStats, TableReader,
};
use crate::processing::{normalize_columns, validate_columns};
use crate::schema::load_schema;
use crate::summary::summarize_with;
use crate::types::{FileSummary, Schema, Table};
use crate::writer::write_compressed_with_level;

/// Options controlling a pipeline run.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct PipelineOptions {
    /// Backend used for both the write-path read and the summary read.
    pub reader: ReaderBackend,
    /// Delimiter of the input file.
    pub input_delimiter: u8,
    /// Gzip compression level (0-9).
    pub compression_level: u32,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: PipelineSeverity,
}

impl fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("reader", &self.reader)
            .field("input_delimiter", &(self.input_delimiter as char))
            .field("compression_level", &self.compression_level)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            reader: ReaderBackend::default(),
            input_delimiter: b',',
            compression_level: Compression::default().level(),
            observer: None,
            alert_at_or_above: PipelineSeverity::Critical,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Schema the input was validated against.
    pub schema: Schema,
    /// Rows written to the output.
    pub rows_written: usize,
    /// Column labels written to the output header (normalized).
    pub columns: Vec<String>,
    /// Statistics of the source file, or `None` if they could not be computed.
    pub summary: Option<FileSummary>,
}

/// Owned description of one pipeline run.
#[derive(Clone)]
pub struct PipelineRequest {
    /// Input table path.
    pub input: PathBuf,
    /// Schema document path.
    pub schema: PathBuf,
    /// Output path for the gzip file.
    pub output: PathBuf,
    /// Options controlling the run.
    pub options: PipelineOptions,
}

impl fmt::Debug for PipelineRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineRequest")
            .field("input", &self.input)
            .field("schema", &self.schema)
            .field("output", &self.output)
            .field("options", &self.options)
            .finish()
    }
}

impl PipelineRequest {
    /// Create a request with default options.
    pub fn new(input: impl Into<PathBuf>, schema: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            schema: schema.into(),
            output: output.into(),
            options: PipelineOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Execute the request by calling [`run_pipeline`].
    pub fn run(&self) -> PipelineResult<PipelineReport> {
        run_pipeline(&self.input, &self.schema, &self.output, &self.options)
    }
}

/// Run the whole pipeline once.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use schema_gzip_ingest::ingestion::StdErrObserver;
/// use schema_gzip_ingest::pipeline::{run_pipeline, PipelineOptions};
///
/// # fn main() -> Result<(), schema_gzip_ingest::PipelineError> {
/// let opts = PipelineOptions {
///     observer: Some(Arc::new(StdErrObserver)),
///     ..Default::default()
/// };
/// let report = run_pipeline("training_data.csv", "schema.yaml", "output.txt.gz", &opts)?;
/// if let Some(summary) = report.summary {
///     println!("rows={} columns={} bytes={}", summary.row_count, summary.column_count, summary.byte_size);
/// }
/// # Ok(())
/// # }
/// ```
pub fn run_pipeline(
    input: impl AsRef<Path>,
    schema_path: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &PipelineOptions,
) -> PipelineResult<PipelineReport> {
    let run = Run {
        input: input.as_ref(),
        schema: schema_path.as_ref(),
        output: output.as_ref(),
        options,
    };

    let schema = run.stage(PipelineStage::LoadSchema, || load_schema(run.schema), |s: &Schema| StageStats {
        rows: 0,
        columns: s.columns.len(),
    })?;

    let (reader, table) = run.stage(
        PipelineStage::Read,
        || {
            let reader = options.reader.reader(options.input_delimiter)?;
            let table = reader.read_table(run.input)?;
            Ok((reader, table))
        },
        |(_, table): &(Box<dyn TableReader>, Table)| table_stats(table),
    )?;
    let table = run.stage(PipelineStage::Normalize, || Ok(normalize_columns(table)), table_stats)?;
    run.stage(PipelineStage::Validate, || validate_columns(&table, &schema), |_| table_stats(&table))?;

    let level = Compression::new(options.compression_level.min(9));
    run.stage(
        PipelineStage::Write,
        || write_compressed_with_level(&table, run.output, schema.separator_byte()?, level),
        |_| table_stats(&table),
    )?;

    let Table { columns, rows } = table;
    let summary = match summarize_with(reader.as_ref(), run.input) {
        Ok(s) => {
            run.report_ok(PipelineStage::Summarize, StageStats {
                rows: s.row_count,
                columns: s.column_count,
            });
            Some(s)
        }
        Err(e) => {
            run.report_err(PipelineStage::Summarize, &e);
            None
        }
    };

    Ok(PipelineReport {
        schema,
        rows_written: rows.len(),
        columns,
        summary,
    })
}

struct Run<'a> {
    input: &'a Path,
    schema: &'a Path,
    output: &'a Path,
    options: &'a PipelineOptions,
}

impl Run<'_> {
    fn context(&self, stage: PipelineStage) -> PipelineContext {
        PipelineContext {
            input: self.input.to_path_buf(),
            schema: self.schema.to_path_buf(),
            output: self.output.to_path_buf(),
            stage,
        }
    }

    fn stage<T>(
        &self,
        stage: PipelineStage,
        f: impl FnOnce() -> PipelineResult<T>,
        stats: impl FnOnce(&T) -> StageStats,
    ) -> PipelineResult<T> {
        let result = f();
        match &result {
            Ok(v) => self.report_ok(stage, stats(v)),
            Err(e) => self.report_err(stage, e),
        }
        result
    }

    fn report_ok(&self, stage: PipelineStage, stats: StageStats) {
        if let Some(obs) = self.options.observer.as_ref() {
            obs.on_stage_complete(&self.context(stage), stats);
        }
    }

    fn report_err(&self, stage: PipelineStage, e: &PipelineError) {
        if let Some(obs) = self.options.observer.as_ref() {
            let ctx = self.context(stage);
            let sev = e.severity();
            obs.on_failure(&ctx, sev, e);
            if sev >= self.options.alert_at_or_above {
                obs.on_alert(&ctx, sev, e);
            }
        }
    }
}

fn table_stats(table: &Table) -> StageStats {
    StageStats {
        rows: table.row_count(),
        columns: table.column_count(),
    }
}
