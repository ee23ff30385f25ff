//! `survey-clean` turns a raw spreadsheet export of survey responses into a labeled,
//! analysis-ready dataset.
//!
//! The primary entrypoint is [`pipeline::clean_survey_data`], which reads a workbook (or
//! delimited text), reshapes it, and writes a Parquet file whose fields carry variable labels
//! and categorical level sets. [`pipeline::run_pipeline`] does the same with explicit
//! [`pipeline::CleaningOptions`].
//!
//! ## What a run does
//!
//! 1. **Read**: the first (or a named) sheet of `.xlsx`/`.xls`/`.xlsm`/`.xlsb`/`.ods`, or a
//!    `.csv`/`.tsv` file. The first row is the header.
//! 2. **Normalize names**: columns are renamed `q1`, `q2`, ... by position. The original
//!    (cleaned) headers are kept in a [`types::NameMapping`].
//! 3. **Sanitize**: text is trimmed, rows that are entirely blank are dropped, then columns
//!    that are entirely missing are dropped.
//! 4. **Infer categoricals**: a column with at most `threshold` distinct values (default 10)
//!    becomes categorical, with levels in first-occurrence order.
//! 5. **Attach labels**: each surviving column gets its original header as variable label,
//!    matched by short id.
//! 6. **Write**: the table is persisted once, atomically. A failed run leaves no output.
//!
//! ## Quick example
//!
//! ```no_run
//! use survey_clean::pipeline::clean_survey_data;
//!
//! # fn main() -> Result<(), survey_clean::CleaningError> {
//! let table = clean_survey_data("responses.xlsx", "responses.parquet", 10)?;
//! println!("rows={} columns={}", table.row_count(), table.column_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors and warnings
//!
//! Fatal conditions are [`CleaningError`]s: a missing source ([`CleaningError::SourceNotFound`])
//! is reported before anything is read, and an unwritable destination
//! ([`CleaningError::SinkWrite`]) leaves nothing behind. Non-fatal conditions are
//! [`CleaningWarning`]s returned on [`pipeline::CleaningOutcome`] and reported to the
//! configured [`pipeline::CleaningObserver`].
//!
//! ## Modules
//!
//! - [`ingestion`]: source readers (CSV/TSV, workbooks) and the unified [`ingestion::read_table`]
//! - [`processing`]: the in-memory shaping stages
//! - [`export`]: Parquet writer and codebook sidecar
//! - [`pipeline`]: orchestration, options and observers
//! - [`types`]: cells, tables, name mapping and categorical columns
//! - [`error`]: error and warning types

pub mod error;
pub mod export;
pub mod ingestion;
pub mod pipeline;
pub mod processing;
pub mod types;

pub use error::{CleaningError, CleaningResult, CleaningWarning};
pub use pipeline::{clean_survey_data, run_pipeline};
