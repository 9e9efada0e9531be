use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::PipelineError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal, e.g. a missing summary target).
    Warning,
    /// Error-level event (the run failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    LoadSchema,
    Read,
    Normalize,
    Validate,
    Write,
    Summarize,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::LoadSchema => "load_schema",
            Self::Read => "read",
            Self::Normalize => "normalize",
            Self::Validate => "validate",
            Self::Write => "write",
            Self::Summarize => "summarize",
        };
        f.write_str(s)
    }
}

/// Context about a pipeline stage.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Input table path.
    pub input: PathBuf,
    /// Schema document path.
    pub schema: PathBuf,
    /// Output path.
    pub output: PathBuf,
    /// Stage the event belongs to.
    pub stage: PipelineStage,
}

/// Table shape after a completed stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageStats {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
}

/// Observer interface for pipeline progress and failures.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait PipelineObserver: Send + Sync {
    /// Called when a stage completes.
    fn on_stage_complete(&self, _ctx: &PipelineContext, _stats: StageStats) {}

    /// Called when a stage fails (or degrades, for the summary stage).
    fn on_failure(&self, _ctx: &PipelineContext, _severity: PipelineSeverity, _error: &PipelineError) {}

    /// Called when a failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &PipelineError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_stage_complete(&self, ctx: &PipelineContext, stats: StageStats) {
        for o in &self.observers {
            o.on_stage_complete(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &PipelineError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &PipelineError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs pipeline events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PipelineObserver for StdErrObserver {
    fn on_stage_complete(&self, ctx: &PipelineContext, stats: StageStats) {
        eprintln!(
            "[pipeline][ok] stage={} input={} rows={} columns={}",
            ctx.stage,
            ctx.input.display(),
            stats.rows,
            stats.columns
        );
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &PipelineError) {
        eprintln!(
            "[pipeline][{:?}] stage={} input={} err={}",
            severity,
            ctx.stage,
            ctx.input.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &PipelineError) {
        eprintln!(
            "[ALERT][pipeline][{:?}] stage={} input={} err={}",
            severity,
            ctx.stage,
            ctx.input.display(),
            error
        );
    }
}

/// Appends pipeline events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_stage_complete(&self, ctx: &PipelineContext, stats: StageStats) {
        self.append_line(&format!(
            "{} ok stage={} input={} output={} rows={} columns={}",
            unix_ts(),
            ctx.stage,
            ctx.input.display(),
            ctx.output.display(),
            stats.rows,
            stats.columns
        ));
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &PipelineError) {
        self.append_line(&format!(
            "{} fail severity={:?} stage={} input={} err={}",
            unix_ts(),
            severity,
            ctx.stage,
            ctx.input.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, error: &PipelineError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} stage={} input={} err={}",
            unix_ts(),
            severity,
            ctx.stage,
            ctx.input.display(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
