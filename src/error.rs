use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for cleaning operations.
pub type CleaningResult<T> = Result<T, CleaningError>;

/// Fatal error returned by a cleaning run.
///
/// Any of these aborts the run before the output file is persisted.
#[derive(Debug, Error)]
pub enum CleaningError {
    /// The input path does not exist or cannot be opened.
    #[error("source not found: {path}: {source}")]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input or output path has an extension we cannot read or write.
    #[error("unsupported format for {path}: {message}")]
    UnsupportedFormat { path: PathBuf, message: String },

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook reader error.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// The destination could not be written (permissions, missing directory, encoder failure).
    #[error("failed to write output {path}: {message}")]
    SinkWrite { path: PathBuf, message: String },
}

impl CleaningError {
    pub(crate) fn sink(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::SinkWrite {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Non-fatal condition raised during a run.
///
/// Warnings never stop processing; each one describes the fallback that was applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CleaningWarning {
    /// The name mapping and the table disagree on column count at labeling time.
    #[error(
        "label mismatch: name mapping has {mapping_entries} entries but table has {table_columns} columns"
    )]
    LabelMismatch {
        mapping_entries: usize,
        table_columns: usize,
    },

    /// A column id has no name mapping entry; the id itself was used as its label.
    #[error("no original header recorded for column '{short_id}', labeled with its id")]
    UnmappedColumn { short_id: String },
}
