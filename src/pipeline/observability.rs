use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{CleaningError, CleaningWarning};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (run failed).
    Error,
    /// Critical error (missing source, unwritable destination).
    Critical,
}

impl Severity {
    /// Severity of a fatal run error.
    pub fn of(error: &CleaningError) -> Self {
        match error {
            CleaningError::SourceNotFound { .. } | CleaningError::SinkWrite { .. } => Self::Critical,
            CleaningError::UnsupportedFormat { .. } | CleaningError::Csv(_) | CleaningError::Excel(_) => {
                Self::Error
            }
        }
    }
}

/// Context about a cleaning run.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Source spreadsheet.
    pub input: PathBuf,
    /// Destination file.
    pub output: PathBuf,
}

/// Shape of a successful run's result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Rows in the final table.
    pub rows: usize,
    /// Columns in the final table.
    pub columns: usize,
    /// How many of those columns are categorical.
    pub categorical_columns: usize,
    /// Blank rows removed by the sanitizer.
    pub dropped_rows: usize,
    /// All-missing columns removed by the sanitizer.
    pub dropped_columns: usize,
}

/// Observer interface for run outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait CleaningObserver: Send + Sync {
    /// Called when the run succeeded and the output was written.
    fn on_success(&self, _ctx: &RunContext, _stats: RunStats) {}

    /// Called for each non-fatal condition, as soon as it is detected.
    fn on_warning(&self, _ctx: &RunContext, _warning: &CleaningWarning) {}

    /// Called when the run fails.
    fn on_failure(&self, _ctx: &RunContext, _severity: Severity, _error: &CleaningError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &CleaningError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn CleaningObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn CleaningObserver>>) -> Self {
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

impl CleaningObserver for CompositeObserver {
    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_warning(&self, ctx: &RunContext, warning: &CleaningWarning) {
        for o in &self.observers {
            o.on_warning(ctx, warning);
        }
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &CleaningError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &CleaningError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs run events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl CleaningObserver for StdErrObserver {
    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        eprintln!(
            "[clean][ok] input={} output={} rows={} columns={} categorical={} dropped_rows={} dropped_columns={}",
            ctx.input.display(),
            ctx.output.display(),
            stats.rows,
            stats.columns,
            stats.categorical_columns,
            stats.dropped_rows,
            stats.dropped_columns
        );
    }

    fn on_warning(&self, ctx: &RunContext, warning: &CleaningWarning) {
        eprintln!("[clean][Warning] input={} {}", ctx.input.display(), warning);
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &CleaningError) {
        eprintln!(
            "[clean][{:?}] input={} output={} err={}",
            severity,
            ctx.input.display(),
            ctx.output.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &CleaningError) {
        eprintln!(
            "[ALERT][clean][{:?}] input={} output={} err={}",
            severity,
            ctx.input.display(),
            ctx.output.display(),
            error
        );
    }
}

/// Appends run events to a local log file.
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

impl CleaningObserver for FileObserver {
    fn on_success(&self, ctx: &RunContext, stats: RunStats) {
        self.append_line(&format!(
            "{} ok input={} output={} rows={} columns={} categorical={}",
            unix_ts(),
            ctx.input.display(),
            ctx.output.display(),
            stats.rows,
            stats.columns,
            stats.categorical_columns
        ));
    }

    fn on_warning(&self, ctx: &RunContext, warning: &CleaningWarning) {
        self.append_line(&format!(
            "{} warning input={} {}",
            unix_ts(),
            ctx.input.display(),
            warning
        ));
    }

    fn on_failure(&self, ctx: &RunContext, severity: Severity, error: &CleaningError) {
        self.append_line(&format!(
            "{} fail severity={:?} input={} err={}",
            unix_ts(),
            severity,
            ctx.input.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &RunContext, severity: Severity, error: &CleaningError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} input={} err={}",
            unix_ts(),
            severity,
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
