//! Variable label attachment.

use crate::error::CleaningWarning;
use crate::types::{NameMapping, WorkingTable};

/// Attach each column's original header as its variable label.
///
/// Columns are matched to mapping entries by short id, so labels stay aligned after the
/// sanitizer dropped columns. A column without a mapping entry is labeled with its own id.
/// Both conditions are reported as warnings; neither stops processing.
pub fn attach_labels(table: &mut WorkingTable, mapping: &NameMapping) -> Vec<CleaningWarning> {
    let mut warnings = Vec::new();

    if mapping.len() != table.column_count() {
        warnings.push(CleaningWarning::LabelMismatch {
            mapping_entries: mapping.len(),
            table_columns: table.column_count(),
        });
    }

    for col in table.columns_mut() {
        let label = match mapping.header_for(&col.id) {
            Some(header) => header.to_owned(),
            None => {
                warnings.push(CleaningWarning::UnmappedColumn {
                    short_id: col.id.clone(),
                });
                col.id.clone()
            }
        };
        col.label = Some(label);
    }

    warnings
}
