//! Pipeline orchestration: read -> normalize -> sanitize -> infer -> label -> write.
//!
//! Most callers should use [`clean_survey_data`] or, for full control, [`run_pipeline`]
//! with [`CleaningOptions`]. The in-memory part is available on its own as
//! [`shape_table`].
//!
//! A run either persists its output exactly once, at the end, or fails and writes nothing.
//! If an observer is configured, warnings, success and failure are reported to it.

mod observability;

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{CleaningError, CleaningResult, CleaningWarning};
use crate::export::{self, ExportOptions, SinkFormat};
use crate::ingestion::{ReadOptions, read_table};
use crate::processing::{
    DEFAULT_CATEGORICAL_THRESHOLD, InferenceOptions, MissingPolicy, attach_labels, infer_categorical,
    normalize_names, sanitize,
};
use crate::types::{NameMapping, RawTable, WorkingTable};

pub use observability::{
    CleaningObserver, CompositeObserver, FileObserver, RunContext, RunStats, Severity, StdErrObserver,
};

/// Options controlling a cleaning run.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct CleaningOptions {
    /// Maximum distinct-value count of a categorical column.
    pub categorical_threshold: usize,
    /// How missing cells count toward cardinality and levels.
    pub missing: MissingPolicy,
    /// Source format and sheet selection.
    pub read: ReadOptions,
    /// Also write a JSON codebook next to the output.
    pub write_codebook: bool,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn CleaningObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl CleaningOptions {
    /// Default options with a different categorical threshold.
    pub fn with_threshold(categorical_threshold: usize) -> Self {
        Self {
            categorical_threshold,
            ..Self::default()
        }
    }

    /// The shaping-stage subset of these options.
    pub fn inference(&self) -> InferenceOptions {
        InferenceOptions {
            threshold: self.categorical_threshold,
            missing: self.missing.clone(),
        }
    }
}

impl fmt::Debug for CleaningOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleaningOptions")
            .field("categorical_threshold", &self.categorical_threshold)
            .field("missing", &self.missing)
            .field("read", &self.read)
            .field("write_codebook", &self.write_codebook)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            categorical_threshold: DEFAULT_CATEGORICAL_THRESHOLD,
            missing: MissingPolicy::default(),
            read: ReadOptions::default(),
            write_codebook: false,
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Result of the in-memory shaping stages.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedTable {
    /// Final typed and labeled table.
    pub table: WorkingTable,
    /// Short id -> original header mapping for every source column.
    pub mapping: NameMapping,
    pub warnings: Vec<CleaningWarning>,
    pub stats: RunStats,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningOutcome {
    pub table: WorkingTable,
    pub mapping: NameMapping,
    pub warnings: Vec<CleaningWarning>,
    pub stats: RunStats,
    /// Files persisted by the run, data file first.
    pub written: Vec<PathBuf>,
}

/// Run the shaping stages over an already-read table. No I/O.
pub fn shape_table(raw: RawTable, options: &InferenceOptions) -> ShapedTable {
    let (table, mapping) = normalize_names(raw);
    let (table, sanitized) = sanitize(table);
    let mut table = infer_categorical(table, options);
    let warnings = attach_labels(&mut table, &mapping);

    let stats = RunStats {
        rows: table.row_count(),
        columns: table.column_count(),
        categorical_columns: table.columns().iter().filter(|c| c.data.is_categorical()).count(),
        dropped_rows: sanitized.rows_dropped,
        dropped_columns: sanitized.dropped_columns.len(),
    };

    ShapedTable {
        table,
        mapping,
        warnings,
        stats,
    }
}

/// Clean `input` and write the labeled dataset to `output`.
///
/// Returns the final table so the result can be inspected without re-reading the file.
///
/// # Examples
///
/// ```no_run
/// use survey_clean::pipeline::clean_survey_data;
///
/// # fn main() -> Result<(), survey_clean::CleaningError> {
/// let table = clean_survey_data("responses.xlsx", "responses.parquet", 10)?;
/// for label in table.labels() {
///     println!("{} = {}", label.short_id, label.text);
/// }
/// # Ok(())
/// # }
/// ```
pub fn clean_survey_data(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    categorical_threshold: usize,
) -> CleaningResult<WorkingTable> {
    let options = CleaningOptions::with_threshold(categorical_threshold);
    run_pipeline(input, output, &options).map(|outcome| outcome.table)
}

/// Full pipeline with explicit options.
///
/// Stage order: source check, format resolution (input and output), read, normalize,
/// sanitize, infer, label, write. A missing source fails with
/// [`CleaningError::SourceNotFound`] before anything else happens.
///
/// When an observer is configured, this function reports:
///
/// - `on_warning` for every non-fatal condition
/// - `on_success` after the output was persisted
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use std::sync::Arc;
///
/// use survey_clean::pipeline::{run_pipeline, CleaningOptions, StdErrObserver};
///
/// # fn main() -> Result<(), survey_clean::CleaningError> {
/// let opts = CleaningOptions {
///     categorical_threshold: 5,
///     write_codebook: true,
///     observer: Some(Arc::new(StdErrObserver)),
///     ..Default::default()
/// };
/// let outcome = run_pipeline("export.csv", "clean.parquet", &opts)?;
/// println!("categorical columns: {}", outcome.stats.categorical_columns);
/// # Ok(())
/// # }
/// ```
pub fn run_pipeline(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &CleaningOptions,
) -> CleaningResult<CleaningOutcome> {
    let ctx = RunContext {
        input: input.as_ref().to_path_buf(),
        output: output.as_ref().to_path_buf(),
    };

    let result = run_stages(&ctx, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(outcome) => obs.on_success(&ctx, outcome.stats),
            Err(e) => {
                let sev = Severity::of(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn run_stages(ctx: &RunContext, options: &CleaningOptions) -> CleaningResult<CleaningOutcome> {
    check_source(&ctx.input)?;
    options.read.resolve_format(&ctx.input)?;
    SinkFormat::from_path(&ctx.output)?;

    let raw = read_table(&ctx.input, &options.read)?;
    let shaped = shape_table(raw, &options.inference());

    if let Some(obs) = options.observer.as_ref() {
        for w in &shaped.warnings {
            obs.on_warning(ctx, w);
        }
    }

    let export = ExportOptions {
        write_codebook: options.write_codebook,
    };
    let written = export::write_output(&shaped.table, &ctx.output, &export)?;

    Ok(CleaningOutcome {
        table: shaped.table,
        mapping: shaped.mapping,
        warnings: shaped.warnings,
        stats: shaped.stats,
        written,
    })
}

fn check_source(path: &Path) -> CleaningResult<()> {
    let not_found = |source: std::io::Error| CleaningError::SourceNotFound {
        path: path.to_path_buf(),
        source,
    };

    let meta = std::fs::metadata(path).map_err(not_found)?;
    if !meta.is_file() {
        return Err(not_found(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    File::open(path).map(drop).map_err(not_found)
}

/// Owned request object: paths plus options, executed later with [`CleaningRequest::run`].
#[derive(Clone)]
pub struct CleaningRequest {
    /// Source spreadsheet.
    pub input: PathBuf,
    /// Destination file.
    pub output: PathBuf,
    pub options: CleaningOptions,
}

impl fmt::Debug for CleaningRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleaningRequest")
            .field("input", &self.input)
            .field("output", &self.output)
            .field("options", &self.options)
            .finish()
    }
}

impl CleaningRequest {
    /// Execute the request by calling [`run_pipeline`].
    pub fn run(&self) -> CleaningResult<CleaningOutcome> {
        run_pipeline(&self.input, &self.output, &self.options)
    }
}
