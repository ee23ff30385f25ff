use std::sync::{Arc, Mutex};

use survey_clean::pipeline::{
    CleaningObserver, CleaningOptions, CompositeObserver, FileObserver, RunContext, RunStats, Severity,
    run_pipeline,
};
use survey_clean::{CleaningError, CleaningWarning};
use tempfile::TempDir;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<RunStats>>,
    warnings: Mutex<Vec<CleaningWarning>>,
    failures: Mutex<Vec<Severity>>,
    alerts: Mutex<Vec<Severity>>,
}

impl CleaningObserver for RecordingObserver {
    fn on_success(&self, _ctx: &RunContext, stats: RunStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_warning(&self, _ctx: &RunContext, warning: &CleaningWarning) {
        self.warnings.lock().unwrap().push(warning.clone());
    }

    fn on_failure(&self, _ctx: &RunContext, severity: Severity, _error: &CleaningError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &RunContext, severity: Severity, _error: &CleaningError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options_with(obs: Arc<RecordingObserver>) -> CleaningOptions {
    CleaningOptions {
        categorical_threshold: 3,
        observer: Some(obs),
        ..Default::default()
    }
}

#[test]
fn observer_receives_warnings_then_success() {
    let dir = TempDir::new().unwrap();
    let obs = Arc::new(RecordingObserver::default());

    run_pipeline(
        "tests/fixtures/scenario_a.csv",
        dir.path().join("out.parquet"),
        &options_with(obs.clone()),
    )
    .unwrap();

    assert_eq!(
        obs.warnings.lock().unwrap().clone(),
        vec![CleaningWarning::LabelMismatch {
            mapping_entries: 3,
            table_columns: 2
        }]
    );
    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(
        successes,
        vec![RunStats {
            rows: 4,
            columns: 2,
            categorical_columns: 1,
            dropped_rows: 1,
            dropped_columns: 1,
        }]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_missing_source() {
    let dir = TempDir::new().unwrap();
    let obs = Arc::new(RecordingObserver::default());

    let _ = run_pipeline(
        "tests/fixtures/does_not_exist.csv",
        dir.path().join("out.parquet"),
        &options_with(obs.clone()),
    )
    .unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![Severity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![Severity::Critical]);
    assert!(obs.successes.lock().unwrap().is_empty());
}

#[test]
fn unsupported_format_is_error_severity_and_not_alerted_by_default() {
    let dir = TempDir::new().unwrap();
    let obs = Arc::new(RecordingObserver::default());

    let err = run_pipeline(
        "tests/fixtures/scenario_a.csv",
        dir.path().join("out.sav"),
        &options_with(obs.clone()),
    )
    .unwrap_err();

    assert!(matches!(err, CleaningError::UnsupportedFormat { .. }));
    assert_eq!(obs.failures.lock().unwrap().clone(), vec![Severity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lower_alert_threshold_alerts_on_errors() {
    let dir = TempDir::new().unwrap();
    let obs = Arc::new(RecordingObserver::default());
    let opts = CleaningOptions {
        alert_at_or_above: Severity::Error,
        ..options_with(obs.clone())
    };

    let _ = run_pipeline("tests/fixtures/scenario_a.csv", dir.path().join("out.sav"), &opts).unwrap_err();

    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![Severity::Error]);
}

#[test]
fn composite_fans_out_and_file_observer_appends() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("clean.log");
    let recorder = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn CleaningObserver>> = vec![recorder.clone(), Arc::new(FileObserver::new(&log))];
    let composite = CompositeObserver::new(observers);
    let opts = CleaningOptions {
        categorical_threshold: 3,
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    run_pipeline("tests/fixtures/scenario_a.csv", dir.path().join("out.parquet"), &opts).unwrap();
    let _ = run_pipeline("tests/fixtures/does_not_exist.csv", dir.path().join("out2.parquet"), &opts)
        .unwrap_err();

    assert_eq!(recorder.successes.lock().unwrap().len(), 1);
    assert_eq!(recorder.failures.lock().unwrap().clone(), vec![Severity::Critical]);

    let contents = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains(" warning "));
    assert!(lines[1].contains(" ok "));
    assert!(lines[2].contains(" fail severity=Critical"));
    assert!(lines[3].contains(" ALERT severity=Critical"));
}
