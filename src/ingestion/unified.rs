//! Unified reading entrypoint.
//!
//! Most callers should use [`read_table`], which reads a file into a [`crate::types::RawTable`].
//! If [`ReadOptions::format`] is `None`, the source format is inferred from the file
//! extension.

use std::path::Path;

use crate::error::{CleaningError, CleaningResult};
use crate::types::RawTable;

use super::{csv, excel};

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
    /// Spreadsheet/workbook formats.
    Excel,
}

impl SourceFormat {
    /// Parse a source format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Infer the format of `path` from its extension.
    pub fn from_path(path: &Path) -> CleaningResult<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CleaningError::UnsupportedFormat {
                path: path.to_path_buf(),
                message: "cannot infer input format: path has no extension".to_string(),
            })?;

        Self::from_extension(ext).ok_or_else(|| CleaningError::UnsupportedFormat {
            path: path.to_path_buf(),
            message: format!("cannot infer input format from extension '{ext}'"),
        })
    }
}

/// Which sheet of a workbook to read. Only one sheet is ever read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelection {
    /// The first sheet (default).
    #[default]
    First,
    /// A sheet by name.
    Named(String),
}

/// Options controlling how the source is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<SourceFormat>,
    /// Workbook sheet; ignored for delimited text.
    pub sheet: SheetSelection,
}

impl ReadOptions {
    /// The format that will be used for `path`.
    pub fn resolve_format(&self, path: &Path) -> CleaningResult<SourceFormat> {
        match self.format {
            Some(f) => Ok(f),
            None => SourceFormat::from_path(path),
        }
    }
}

/// Read `path` into a [`RawTable`].
///
/// # Examples
///
/// ```no_run
/// use survey_clean::ingestion::{read_table, ReadOptions, SheetSelection};
///
/// # fn main() -> Result<(), survey_clean::CleaningError> {
/// let opts = ReadOptions {
///     sheet: SheetSelection::Named("Responses".to_string()),
///     ..Default::default()
/// };
/// let raw = read_table("export.xlsx", &opts)?;
/// println!("columns={} rows={}", raw.column_count(), raw.row_count());
/// # Ok(())
/// # }
/// ```
pub fn read_table(path: impl AsRef<Path>, options: &ReadOptions) -> CleaningResult<RawTable> {
    let path = path.as_ref();
    match options.resolve_format(path)? {
        SourceFormat::Csv => csv::read_csv_table(path, b','),
        SourceFormat::Tsv => csv::read_csv_table(path, b'\t'),
        SourceFormat::Excel => match &options.sheet {
            SheetSelection::First => excel::read_excel_table(path, None),
            SheetSelection::Named(name) => excel::read_excel_table(path, Some(name.as_str())),
        },
    }
}
