//! JSON codebook sidecar: one entry per variable with its label, kind and level set.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::SinkError;
use crate::types::{ColumnData, VariableKind, WorkingTable};

/// Machine-readable description of a cleaned dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codebook {
    pub rows: usize,
    pub variables: Vec<CodebookEntry>,
}

/// One variable of a [`Codebook`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodebookEntry {
    pub id: String,
    pub label: String,
    pub kind: VariableKind,
    /// Level set in code order (categorical variables only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub levels: Vec<String>,
    /// Level that missing answers are coded to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_level: Option<String>,
}

impl Codebook {
    pub fn from_table(table: &WorkingTable) -> Self {
        let variables = table
            .columns()
            .iter()
            .map(|col| {
                let (levels, missing_level) = match &col.data {
                    ColumnData::Categorical(cat) => (
                        cat.levels().to_vec(),
                        cat.missing_level().and_then(|i| cat.levels().get(i).cloned()),
                    ),
                    ColumnData::Plain(_) => (Vec::new(), None),
                };
                CodebookEntry {
                    id: col.id.clone(),
                    label: col.label.clone().unwrap_or_else(|| col.id.clone()),
                    kind: col.kind(),
                    levels,
                    missing_level,
                }
            })
            .collect();

        Self {
            rows: table.row_count(),
            variables,
        }
    }
}

/// Sidecar path for `output`: `survey.parquet` -> `survey.codebook.json`.
pub fn codebook_path(output: &Path) -> PathBuf {
    output.with_extension("codebook.json")
}

/// Write the codebook of `table` as pretty-printed JSON.
pub fn write_codebook<W: Write>(table: &WorkingTable, writer: W) -> Result<(), SinkError> {
    serde_json::to_writer_pretty(writer, &Codebook::from_table(table))?;
    Ok(())
}
