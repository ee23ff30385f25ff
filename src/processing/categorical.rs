//! Categorical-vs-continuous inference by cardinality.
//!
//! A column is categorical when its number of distinct stringified values is at least one
//! and at most the threshold. Low-cardinality columns are closed-set answers (Likert scales,
//! yes/no); everything else is free text or a measurement and stays a plain column.
//!
//! A column with zero distinct values is never categorical, so `threshold = 0` never
//! produces a categorical column. Under the default [`MissingPolicy`] an all-missing column
//! has one distinct value and a single missing level.

use std::collections::{HashMap, HashSet};

use crate::types::{CategoricalColumn, Cell, Column, ColumnData, WorkingTable};

/// Threshold used when none is configured.
pub const DEFAULT_CATEGORICAL_THRESHOLD: usize = 10;

/// Level text missing cells are coded to when no other label is configured.
pub const DEFAULT_MISSING_LABEL: &str = "NA";

/// How missing cells take part in cardinality counting and level sets.
///
/// Missing cells either count as a value, and then always get a level, or are left out of
/// both the count and the level set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Missing counts and becomes a level with this text, at its first-occurrence position.
    ///
    /// If the text equals an observed value, both share that level.
    Level(String),
    /// Missing is neither counted nor a level; missing cells stay uncoded.
    Ignore,
}

impl Default for MissingPolicy {
    fn default() -> Self {
        Self::Level(DEFAULT_MISSING_LABEL.to_string())
    }
}

/// Settings for [`infer_categorical`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceOptions {
    /// Maximum distinct-value count of a categorical column.
    pub threshold: usize,
    pub missing: MissingPolicy,
}

impl InferenceOptions {
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CATEGORICAL_THRESHOLD,
            missing: MissingPolicy::default(),
        }
    }
}

/// Number of distinct stringified values in `cells` under `policy`.
pub fn distinct_count(cells: &[Cell], policy: &MissingPolicy) -> usize {
    let mut seen: HashSet<String> = HashSet::new();
    let mut has_missing = false;
    for cell in cells {
        match cell.as_level() {
            Some(key) => {
                seen.insert(key);
            }
            None => has_missing = true,
        }
    }

    let missing_extra = match policy {
        MissingPolicy::Ignore => false,
        MissingPolicy::Level(label) => has_missing && !seen.contains(label),
    };
    seen.len() + usize::from(missing_extra)
}

/// Whether `cells` should become a categorical column.
pub fn is_categorical(cells: &[Cell], options: &InferenceOptions) -> bool {
    let n = distinct_count(cells, &options.missing);
    n >= 1 && n <= options.threshold
}

/// Distinct stringified values in first-occurrence order.
pub fn level_set(cells: &[Cell], policy: &MissingPolicy) -> Vec<String> {
    build_levels(cells, policy).0
}

fn build_levels(cells: &[Cell], policy: &MissingPolicy) -> (Vec<String>, Option<usize>) {
    let mut levels: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut missing_level: Option<usize> = None;

    for cell in cells {
        let key = match (cell.as_level(), policy) {
            (Some(key), _) => key,
            (None, MissingPolicy::Level(label)) => label.clone(),
            (None, _) => continue,
        };
        let idx = *index.entry(key).or_insert_with_key(|k| {
            levels.push(k.clone());
            levels.len() - 1
        });
        if cell.is_missing() {
            missing_level.get_or_insert(idx);
        }
    }

    (levels, missing_level)
}

/// Convert cells into a [`CategoricalColumn`] with a first-occurrence level set.
pub fn to_categorical(cells: Vec<Cell>, policy: &MissingPolicy) -> CategoricalColumn {
    let (levels, missing_level) = build_levels(&cells, policy);
    CategoricalColumn::from_parts(cells, levels, missing_level)
}

/// Convert every low-cardinality plain column into a categorical column.
///
/// Columns are examined independently; the column set and row count are unchanged.
pub fn infer_categorical(table: WorkingTable, options: &InferenceOptions) -> WorkingTable {
    let columns = table
        .into_columns()
        .into_iter()
        .map(|col| match col.data {
            ColumnData::Plain(cells) if is_categorical(&cells, options) => Column {
                id: col.id,
                data: ColumnData::Categorical(to_categorical(cells, &options.missing)),
                label: col.label,
            },
            data => Column { data, ..col },
        })
        .collect();
    WorkingTable::new(columns)
}
