//! Source readers: spreadsheet and delimited-text files into a [`crate::types::RawTable`].
//!
//! Most callers should use [`read_table`] (from [`unified`]), which picks the reader from
//! the file extension or from [`ReadOptions::format`].
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`excel`]

pub mod csv;
pub mod excel;
pub mod unified;

pub use unified::{ReadOptions, SheetSelection, SourceFormat, read_table};
