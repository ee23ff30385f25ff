//! Output writers.
//!
//! The labeled table is written as Parquet ([`parquet`]), optionally with a JSON codebook
//! sidecar ([`codebook`]). Everything is first written to temporary files in the destination
//! directory and only persisted once every file encoded successfully, so a failed run leaves
//! no output behind.

pub mod codebook;
pub mod parquet;

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::error::{CleaningError, CleaningResult};
use crate::types::WorkingTable;

/// Encoder-level failure, wrapped into [`CleaningError::SinkWrite`] with the output path.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] ::parquet::errors::ParquetError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The table holds something the format cannot represent.
    #[error("unsupported table: {0}")]
    Unsupported(String),
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkFormat {
    /// Apache Parquet with Arrow schema metadata.
    Parquet,
}

impl SinkFormat {
    /// Parse an output format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "parquet" | "pq" => Some(Self::Parquet),
            _ => None,
        }
    }

    /// Infer the output format of `path` from its extension.
    pub fn from_path(path: &Path) -> CleaningResult<Self> {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| CleaningError::UnsupportedFormat {
                path: path.to_path_buf(),
                message: "output must be a .parquet or .pq file".to_string(),
            })
    }
}

/// Options controlling what gets written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Also write `<stem>.codebook.json` next to the output.
    pub write_codebook: bool,
}

/// Write `table` to `path` (plus the codebook sidecar, if enabled).
///
/// Returns the paths that were written, data file first.
pub fn write_output(table: &WorkingTable, path: &Path, options: &ExportOptions) -> CleaningResult<Vec<PathBuf>> {
    let format = SinkFormat::from_path(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut data = NamedTempFile::new_in(dir).map_err(|e| CleaningError::sink(path, e))?;
    match format {
        SinkFormat::Parquet => {
            parquet::write_parquet(table, data.as_file_mut()).map_err(|e| CleaningError::sink(path, e))?;
        }
    }

    let sidecar = if options.write_codebook {
        let sidecar_path = codebook::codebook_path(path);
        if sidecar_path.is_dir() {
            return Err(CleaningError::sink(&sidecar_path, "destination is a directory"));
        }
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| CleaningError::sink(&sidecar_path, e))?;
        codebook::write_codebook(table, tmp.as_file_mut()).map_err(|e| CleaningError::sink(&sidecar_path, e))?;
        Some((tmp, sidecar_path))
    } else {
        None
    };

    data.persist(path).map_err(|e| CleaningError::sink(path, e.error))?;
    let mut written = vec![path.to_path_buf()];

    if let Some((tmp, sidecar_path)) = sidecar {
        if let Err(e) = tmp.persist(&sidecar_path) {
            // A failed run leaves no output.
            let _ = std::fs::remove_file(path);
            return Err(CleaningError::sink(&sidecar_path, e.error));
        }
        written.push(sidecar_path);
    }

    Ok(written)
}
