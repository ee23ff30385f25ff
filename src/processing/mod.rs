//! The data-shaping stages of the cleaning pipeline.
//!
//! Each stage is a plain in-memory transformation over [`crate::types::WorkingTable`]:
//!
//! - [`normalize_names()`]: positional short ids (`q1`, `q2`, ...) plus a [`crate::types::NameMapping`]
//! - [`sanitize()`]: trim text, drop blank rows, drop all-missing columns
//! - [`infer_categorical()`]: cardinality-threshold typing into categorical columns
//! - [`attach_labels()`]: original headers as variable labels, matched by short id
//!
//! ## Example
//!
//! ```rust
//! use survey_clean::processing::{
//!     attach_labels, infer_categorical, normalize_names, sanitize, InferenceOptions,
//! };
//! use survey_clean::types::{Cell, RawTable};
//!
//! let raw = RawTable::from_rows(
//!     vec!["Age".to_string(), "Favorite Color ".to_string(), "Notes".to_string()],
//!     vec![
//!         vec![Cell::Number(34.0), Cell::text("Blue "), Cell::Missing],
//!         vec![Cell::Missing, Cell::text("  "), Cell::Missing],
//!         vec![Cell::Number(28.0), Cell::text("Red"), Cell::Missing],
//!     ],
//! );
//!
//! let (table, mapping) = normalize_names(raw);
//! let (table, _stats) = sanitize(table);
//! let mut table = infer_categorical(table, &InferenceOptions::with_threshold(3));
//! let _warnings = attach_labels(&mut table, &mapping);
//!
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.column_ids().collect::<Vec<_>>(), vec!["q1", "q2"]);
//! assert_eq!(table.column("q2").unwrap().label.as_deref(), Some("Favorite Color"));
//! assert!(table.column("q2").unwrap().data.is_categorical());
//! ```

pub mod categorical;
pub mod labels;
pub mod normalize;
pub mod sanitize;

pub use categorical::{
    DEFAULT_CATEGORICAL_THRESHOLD, DEFAULT_MISSING_LABEL, InferenceOptions, MissingPolicy, distinct_count,
    infer_categorical, is_categorical, level_set, to_categorical,
};
pub use labels::attach_labels;
pub use normalize::{clean_header, normalize_names};
pub use sanitize::{SanitizeStats, drop_blank_rows, drop_missing_columns, sanitize, trim_text_cells};
