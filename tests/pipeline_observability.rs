use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use schema_gzip_ingest::PipelineError;
use schema_gzip_ingest::ingestion::{
    FileObserver, PipelineContext, PipelineObserver, PipelineSeverity, PipelineStage, StageStats,
};
use schema_gzip_ingest::pipeline::{run_pipeline, PipelineOptions};

#[derive(Default)]
struct RecordingObserver {
    completed: Mutex<Vec<(PipelineStage, StageStats)>>,
    failures: Mutex<Vec<(PipelineStage, PipelineSeverity)>>,
    alerts: Mutex<Vec<(PipelineStage, PipelineSeverity)>>,
}

impl PipelineObserver for RecordingObserver {
    fn on_stage_complete(&self, ctx: &PipelineContext, stats: StageStats) {
        self.completed.lock().unwrap().push((ctx.stage, stats));
    }

    fn on_failure(&self, ctx: &PipelineContext, severity: PipelineSeverity, _error: &PipelineError) {
        self.failures.lock().unwrap().push((ctx.stage, severity));
    }

    fn on_alert(&self, ctx: &PipelineContext, severity: PipelineSeverity, _error: &PipelineError) {
        self.alerts.lock().unwrap().push((ctx.stage, severity));
    }
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

fn tmp_file(ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("schema-gzip-ingest-observer-{nanos}-{n}.{ext}"))
}

fn options(obs: Arc<RecordingObserver>, alert_at_or_above: PipelineSeverity) -> PipelineOptions {
    PipelineOptions {
        observer: Some(obs),
        alert_at_or_above,
        ..Default::default()
    }
}

#[test]
fn every_stage_is_reported_in_order_on_success() {
    let obs = Arc::new(RecordingObserver::default());
    let output = tmp_file("gz");

    run_pipeline(
        "tests/fixtures/id_value.csv",
        "tests/fixtures/schema.yaml",
        &output,
        &options(obs.clone(), PipelineSeverity::Critical),
    )
    .unwrap();

    let completed = obs.completed.lock().unwrap().clone();
    let stages: Vec<PipelineStage> = completed.iter().map(|(s, _)| *s).collect();
    assert_eq!(
        stages,
        vec![
            PipelineStage::LoadSchema,
            PipelineStage::Read,
            PipelineStage::Normalize,
            PipelineStage::Validate,
            PipelineStage::Write,
            PipelineStage::Summarize,
        ]
    );
    assert_eq!(completed[1].1, StageStats { rows: 3, columns: 2 });
    assert!(obs.failures.lock().unwrap().is_empty());

    let _ = std::fs::remove_file(&output);
}

#[test]
fn validation_failure_is_error_without_alert_at_critical_threshold() {
    let obs = Arc::new(RecordingObserver::default());
    let output = tmp_file("gz");

    let _ = run_pipeline(
        "tests/fixtures/wrong_order.csv",
        "tests/fixtures/schema.yaml",
        &output,
        &options(obs.clone(), PipelineSeverity::Critical),
    )
    .unwrap_err();

    assert_eq!(
        obs.failures.lock().unwrap().clone(),
        vec![(PipelineStage::Validate, PipelineSeverity::Error)]
    );
    assert!(obs.alerts.lock().unwrap().is_empty());
    let stages: Vec<PipelineStage> = obs.completed.lock().unwrap().iter().map(|(s, _)| *s).collect();
    assert!(!stages.contains(&PipelineStage::Write));
}

#[test]
fn missing_input_is_critical_and_alerts() {
    let obs = Arc::new(RecordingObserver::default());
    let output = tmp_file("gz");

    let _ = run_pipeline(
        "tests/fixtures/does_not_exist.csv",
        "tests/fixtures/schema.yaml",
        &output,
        &options(obs.clone(), PipelineSeverity::Critical),
    )
    .unwrap_err();

    assert_eq!(
        obs.failures.lock().unwrap().clone(),
        vec![(PipelineStage::Read, PipelineSeverity::Critical)]
    );
    assert_eq!(
        obs.alerts.lock().unwrap().clone(),
        vec![(PipelineStage::Read, PipelineSeverity::Critical)]
    );
}

#[test]
fn schema_failure_alerts_at_error_threshold() {
    let obs = Arc::new(RecordingObserver::default());
    let output = tmp_file("gz");

    let _ = run_pipeline(
        "tests/fixtures/id_value.csv",
        "tests/fixtures/missing_separator.yaml",
        &output,
        &options(obs.clone(), PipelineSeverity::Error),
    )
    .unwrap_err();

    assert_eq!(
        obs.alerts.lock().unwrap().clone(),
        vec![(PipelineStage::LoadSchema, PipelineSeverity::Error)]
    );
}

#[test]
fn file_observer_appends_lines() {
    let log = tmp_file("log");
    let output = tmp_file("gz");
    let opts = PipelineOptions {
        observer: Some(Arc::new(FileObserver::new(&log))),
        ..Default::default()
    };

    run_pipeline("tests/fixtures/id_value.csv", "tests/fixtures/schema.yaml", &output, &opts).unwrap();

    let text = std::fs::read_to_string(&log).unwrap();
    assert_eq!(text.lines().count(), 6);
    assert!(text.lines().all(|l| l.contains(" ok stage=")));
    assert!(text.contains("stage=write"));

    let _ = std::fs::remove_file(&log);
    let _ = std::fs::remove_file(&output);
}
