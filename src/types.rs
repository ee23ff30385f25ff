//! Core data model for the cleaning pipeline.
//!
//! A spreadsheet is read into a [`RawTable`] (free-text headers, heterogeneous [`Cell`]s).
//! Name normalization turns it into a [`WorkingTable`] keyed by short ids (`q1`, `q2`, ...)
//! plus a [`NameMapping`] back to the original headers. Later stages retype columns into
//! [`CategoricalColumn`]s and attach variable labels, but never add or remove columns.

use serde::{Deserialize, Serialize};

/// A single scalar value read from the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Empty / missing cell.
    Missing,
    /// Numeric cell (integers and dates are carried as `f64`).
    Number(f64),
    /// Text cell, untrimmed until sanitization.
    Text(String),
}

impl Cell {
    /// Create a text cell.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// `true` for missing cells and empty text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Text(s) => s.is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Stringified value used for cardinality counting and level sets.
    ///
    /// Returns `None` for [`Cell::Missing`].
    pub fn as_level(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Number(v) => Some(format_number(*v)),
            Self::Text(s) => Some(s.clone()),
        }
    }
}

/// Format a number the way it should appear as a category: `3.0` becomes `"3"`.
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        (v as i64).to_string()
    } else {
        v.to_string()
    }
}

/// Table as produced by a reader: ordered headers and equal-length columns.
///
/// Constructors pad ragged input with [`Cell::Missing`] and blank headers so the table is
/// always rectangular.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    columns: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Create a table from column-major storage.
    pub fn new(mut headers: Vec<String>, mut columns: Vec<Vec<Cell>>) -> Self {
        let width = headers.len().max(columns.len());
        let height = columns.iter().map(Vec::len).max().unwrap_or(0);
        headers.resize(width, String::new());
        columns.resize_with(width, Vec::new);
        for col in &mut columns {
            col.resize(height, Cell::Missing);
        }
        Self { headers, columns }
    }

    /// Create a table from row-major storage.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).fold(headers.len(), usize::max);
        let mut columns: Vec<Vec<Cell>> = (0..width).map(|_| Vec::with_capacity(rows.len())).collect();
        for row in rows {
            let mut cells = row.into_iter();
            for col in &mut columns {
                col.push(cells.next().unwrap_or(Cell::Missing));
            }
        }
        Self::new(headers, columns)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn columns(&self) -> &[Vec<Cell>] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Split into headers and columns.
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<Cell>>) {
        (self.headers, self.columns)
    }
}

/// Short id for the column at 0-based `index`: `q1`, `q2`, ...
pub fn short_id(index: usize) -> String {
    format!("q{}", index + 1)
}

/// One `(original header, short id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    /// Header text after header cleanup. May be empty.
    pub original_header: String,
    /// Positional id, unique within one run.
    pub short_id: String,
}

/// Ordered mapping from short ids back to the original header text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMapping {
    entries: Vec<NameEntry>,
}

impl NameMapping {
    /// Assign `q1..qN` to `headers` in order.
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = headers
            .into_iter()
            .enumerate()
            .map(|(idx, h)| NameEntry {
                original_header: h.into(),
                short_id: short_id(idx),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[NameEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Original header recorded for `short_id`, if any.
    pub fn header_for(&self, short_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.short_id == short_id)
            .map(|e| e.original_header.as_str())
    }
}

/// A discrete column with a fixed, ordered level set.
///
/// Levels are distinct stringified values in first-occurrence order. Every non-missing
/// cell's value is one of the levels; when a missing sentinel level is in use, missing
/// cells are coded to it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalColumn {
    cells: Vec<Cell>,
    levels: Vec<String>,
    missing_level: Option<usize>,
}

impl CategoricalColumn {
    pub(crate) fn from_parts(cells: Vec<Cell>, levels: Vec<String>, missing_level: Option<usize>) -> Self {
        Self {
            cells,
            levels,
            missing_level,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Index of the level that stands for missing cells, if missing values are coded.
    pub fn missing_level(&self) -> Option<usize> {
        self.missing_level
    }

    /// Per-row level index (`None` for uncoded missing cells).
    pub fn codes(&self) -> Vec<Option<usize>> {
        self.cells
            .iter()
            .map(|cell| match cell.as_level() {
                Some(key) => self.levels.iter().position(|l| *l == key),
                None => self.missing_level,
            })
            .collect()
    }

    fn select_rows(&self, keep: &[bool]) -> Self {
        Self {
            cells: select_rows(&self.cells, keep),
            levels: self.levels.clone(),
            missing_level: self.missing_level,
        }
    }
}

/// Storage of one column: raw cells, or a categorical column after inference.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Plain(Vec<Cell>),
    Categorical(CategoricalColumn),
}

impl ColumnData {
    pub fn cells(&self) -> &[Cell] {
        match self {
            Self::Plain(cells) => cells,
            Self::Categorical(cat) => cat.cells(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells().is_empty()
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self, Self::Categorical(_))
    }

    /// Level set, for categorical columns.
    pub fn levels(&self) -> Option<&[String]> {
        match self {
            Self::Plain(_) => None,
            Self::Categorical(cat) => Some(cat.levels()),
        }
    }

    fn select_rows(&self, keep: &[bool]) -> Self {
        match self {
            Self::Plain(cells) => Self::Plain(select_rows(cells, keep)),
            Self::Categorical(cat) => Self::Categorical(cat.select_rows(keep)),
        }
    }
}

fn select_rows(cells: &[Cell], keep: &[bool]) -> Vec<Cell> {
    cells
        .iter()
        .zip(keep)
        .filter(|(_, k)| **k)
        .map(|(c, _)| c.clone())
        .collect()
}

/// Storage kind of a column in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// Dictionary-coded column with a level set.
    Categorical,
    /// Plain column whose non-missing cells are all numbers.
    Numeric,
    /// Any other plain column.
    Text,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Categorical => "categorical",
            Self::Numeric => "numeric",
            Self::Text => "text",
        }
    }
}

/// A named column of a [`WorkingTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Short id (`q1`, `q2`, ...).
    pub id: String,
    pub data: ColumnData,
    /// Variable label, once attached.
    pub label: Option<String>,
}

impl Column {
    /// Create an unlabeled plain column.
    pub fn plain(id: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            id: id.into(),
            data: ColumnData::Plain(cells),
            label: None,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        self.data.cells()
    }

    pub fn kind(&self) -> VariableKind {
        match &self.data {
            ColumnData::Categorical(_) => VariableKind::Categorical,
            ColumnData::Plain(cells) => {
                let mut present = cells.iter().filter(|c| !c.is_missing()).peekable();
                if present.peek().is_some() && present.all(|c| matches!(c, Cell::Number(_))) {
                    VariableKind::Numeric
                } else {
                    VariableKind::Text
                }
            }
        }
    }
}

/// Association of one short id to its descriptive text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableLabel {
    pub short_id: String,
    pub text: String,
}

/// Ordered columns keyed by short id, all of the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingTable {
    columns: Vec<Column>,
}

impl WorkingTable {
    /// Create a table from columns.
    ///
    /// # Panics
    ///
    /// Panics if the columns do not all have the same length.
    pub fn new(columns: Vec<Column>) -> Self {
        if let Some(first) = columns.first() {
            let expected = first.data.len();
            for col in &columns {
                assert!(
                    col.data.len() == expected,
                    "column '{}' has {} rows, expected {}",
                    col.id,
                    col.data.len(),
                    expected
                );
            }
        }
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Look up a column by short id.
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn column_ids(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.id.as_str())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data.len())
    }

    /// Cells of row `idx` in column order.
    pub fn row(&self, idx: usize) -> Option<Vec<&Cell>> {
        if idx >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().filter_map(|c| c.cells().get(idx)).collect())
    }

    /// Attached variable labels, in column order.
    pub fn labels(&self) -> Vec<VariableLabel> {
        self.columns
            .iter()
            .filter_map(|c| {
                c.label.as_ref().map(|text| VariableLabel {
                    short_id: c.id.clone(),
                    text: text.clone(),
                })
            })
            .collect()
    }

    /// Create a new table containing only rows for which `predicate` returns `true`.
    ///
    /// Columns, labels and level sets are preserved.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[&Cell]) -> bool,
    {
        let keep: Vec<bool> = (0..self.row_count())
            .map(|idx| {
                let row: Vec<&Cell> = self.columns.iter().filter_map(|c| c.cells().get(idx)).collect();
                predicate(&row)
            })
            .collect();

        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                id: c.id.clone(),
                data: c.data.select_rows(&keep),
                label: c.label.clone(),
            })
            .collect();
        Self { columns }
    }

    /// Create a new table containing only columns for which `predicate` returns `true`.
    pub fn filter_columns<F>(self, mut predicate: F) -> Self
    where
        F: FnMut(&Column) -> bool,
    {
        Self {
            columns: self.columns.into_iter().filter(|c| predicate(c)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, Column, NameMapping, RawTable, WorkingTable, format_number, short_id};

    #[test]
    fn numbers_stringify_like_levels() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1e16), "10000000000000000");
        assert_eq!(Cell::Missing.as_level(), None);
    }

    #[test]
    fn ragged_rows_are_padded() {
        let raw = RawTable::from_rows(
            vec!["a".to_string()],
            vec![vec![Cell::Number(1.0), Cell::text("x")], vec![]],
        );
        assert_eq!(raw.headers(), &["a".to_string(), String::new()]);
        assert_eq!(raw.row_count(), 2);
        assert_eq!(raw.columns()[1], vec![Cell::text("x"), Cell::Missing]);
    }

    #[test]
    fn mapping_lookup_is_by_short_id() {
        let mapping = NameMapping::from_headers(["Age", "Color"]);
        assert_eq!(short_id(0), "q1");
        assert_eq!(mapping.header_for("q2"), Some("Color"));
        assert_eq!(mapping.header_for("q3"), None);
    }

    #[test]
    fn filter_rows_keeps_columns_and_labels() {
        let mut col = Column::plain("q1", vec![Cell::Number(1.0), Cell::Missing, Cell::Number(3.0)]);
        col.label = Some("Score".to_string());
        let table = WorkingTable::new(vec![col]);

        let kept = table.filter_rows(|row| !row[0].is_missing());
        assert_eq!(kept.row_count(), 2);
        assert_eq!(kept.labels()[0].text, "Score");
        assert_eq!(kept.row(1), Some(vec![&Cell::Number(3.0)]));
        assert_eq!(kept.row(2), None);
    }

    #[test]
    #[should_panic(expected = "has 1 rows, expected 2")]
    fn unequal_columns_are_rejected() {
        WorkingTable::new(vec![
            Column::plain("q1", vec![Cell::Missing, Cell::Missing]),
            Column::plain("q2", vec![Cell::Missing]),
        ]);
    }
}
