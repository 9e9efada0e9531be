//! Wall-clock comparison of reader backends.
//!
//! This sits outside the pipeline: it reads the same file through each requested
//! [`ReaderBackend`] and records how long a full read took. Nothing here feeds the write path.

use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::PipelineResult;
use crate::ingestion::ReaderBackend;

/// Timing of one backend over a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderTiming {
    /// Backend that was timed.
    pub backend: ReaderBackend,
    /// Rows read (from the last iteration).
    pub rows: usize,
    /// Columns read (from the last iteration).
    pub columns: usize,
    /// Mean elapsed time per read.
    pub elapsed: Duration,
}

impl fmt::Display for ReaderTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reader={} rows={} columns={} took {:.6} seconds",
            self.backend,
            self.rows,
            self.columns,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Read `path` `iterations` times through each backend, in the order given.
///
/// `iterations` of 0 is treated as 1. The first failing read aborts the comparison.
pub fn benchmark_readers(
    path: impl AsRef<Path>,
    backends: &[ReaderBackend],
    delimiter: u8,
    iterations: usize,
) -> PipelineResult<Vec<ReaderTiming>> {
    let path = path.as_ref();
    let iterations = iterations.max(1);
    let mut out = Vec::with_capacity(backends.len());

    for &backend in backends {
        let reader = backend.reader(delimiter)?;
        let mut total = Duration::ZERO;
        let mut shape = (0, 0);
        for _ in 0..iterations {
            let start = Instant::now();
            let table = reader.read_table(path)?;
            total += start.elapsed();
            shape = (table.row_count(), table.column_count());
        }

        out.push(ReaderTiming {
            backend,
            rows: shape.0,
            columns: shape.1,
            elapsed: total / u32::try_from(iterations).unwrap_or(u32::MAX),
        });
    }

    Ok(out)
}
