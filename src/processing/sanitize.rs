//! Whitespace trimming and blank row/column removal.

use crate::types::{Cell, ColumnData, WorkingTable};

/// What [`sanitize`] removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeStats {
    /// Number of rows dropped because every cell was blank.
    pub rows_dropped: usize,
    /// Ids of columns dropped because every cell was missing.
    pub dropped_columns: Vec<String>,
}

/// Trim text cells, then drop blank rows, then drop all-missing columns.
///
/// Trimming runs first so whitespace-only cells count as blank. Column emptiness is judged
/// on the rows that survive, which makes the whole operation a fixed point: sanitizing a
/// sanitized table changes nothing. An empty result is valid.
pub fn sanitize(mut table: WorkingTable) -> (WorkingTable, SanitizeStats) {
    trim_text_cells(&mut table);

    let rows_before = table.row_count();
    let table = drop_blank_rows(&table);
    let rows_dropped = rows_before - table.row_count();

    let ids_before: Vec<String> = table.column_ids().map(str::to_owned).collect();
    let table = drop_missing_columns(table);
    let dropped_columns = ids_before
        .into_iter()
        .filter(|id| table.column(id).is_none())
        .collect();

    (
        table,
        SanitizeStats {
            rows_dropped,
            dropped_columns,
        },
    )
}

/// Trim leading/trailing whitespace of every text cell in plain columns.
///
/// Categorical columns are left alone: their level sets are fixed at conversion time.
pub fn trim_text_cells(table: &mut WorkingTable) {
    for col in table.columns_mut() {
        if let ColumnData::Plain(cells) = &mut col.data {
            for cell in cells.iter_mut() {
                if let Cell::Text(s) = cell {
                    let trimmed = s.trim();
                    if trimmed.len() != s.len() {
                        *s = trimmed.to_owned();
                    }
                }
            }
        }
    }
}

/// Drop every row whose cells are all missing or empty text.
pub fn drop_blank_rows(table: &WorkingTable) -> WorkingTable {
    table.filter_rows(|row| !row.iter().all(|c| c.is_blank()))
}

/// Drop every column whose cells are all missing.
///
/// A column of empty strings is kept. With zero rows every column counts as all-missing.
pub fn drop_missing_columns(table: WorkingTable) -> WorkingTable {
    table.filter_columns(|col| !col.cells().iter().all(Cell::is_missing))
}

#[cfg(test)]
mod tests {
    use super::{drop_blank_rows, drop_missing_columns, sanitize, trim_text_cells};
    use crate::types::{Cell, Column, WorkingTable};

    fn messy() -> WorkingTable {
        WorkingTable::new(vec![
            Column::plain(
                "q1",
                vec![Cell::Number(34.0), Cell::Missing, Cell::text("  "), Cell::Number(45.0)],
            ),
            Column::plain(
                "q2",
                vec![Cell::text(" Blue "), Cell::Missing, Cell::text("\t"), Cell::text("Red")],
            ),
            Column::plain("q3", vec![Cell::Missing, Cell::Missing, Cell::Missing, Cell::Missing]),
            Column::plain("q4", vec![Cell::text(""), Cell::text(""), Cell::text(""), Cell::text("")]),
        ])
    }

    #[test]
    fn trim_only_touches_text() {
        let mut table = messy();
        trim_text_cells(&mut table);

        let q1 = table.column("q1").unwrap().cells();
        assert_eq!(q1[0], Cell::Number(34.0));
        assert_eq!(q1[2], Cell::text(""));
        let q2 = table.column("q2").unwrap().cells();
        assert_eq!(q2[0], Cell::text("Blue"));
        assert_eq!(q2[1], Cell::Missing);
    }

    #[test]
    fn whitespace_only_rows_are_dropped_after_trimming() {
        let (table, stats) = sanitize(messy());

        // Row 1 (all missing) and row 2 (whitespace + empty strings) are gone.
        assert_eq!(table.row_count(), 2);
        assert_eq!(stats.rows_dropped, 2);
        assert_eq!(
            table.column("q2").unwrap().cells(),
            &[Cell::text("Blue"), Cell::text("Red")]
        );
    }

    #[test]
    fn only_all_missing_columns_are_dropped() {
        let (table, stats) = sanitize(messy());

        let ids: Vec<&str> = table.column_ids().collect();
        assert_eq!(ids, vec!["q1", "q2", "q4"]);
        assert_eq!(stats.dropped_columns, vec!["q3".to_string()]);
    }

    #[test]
    fn untrimmed_whitespace_row_survives_plain_row_filter() {
        // Without trimming first, a whitespace cell is not blank.
        let table = WorkingTable::new(vec![Column::plain("q1", vec![Cell::text(" "), Cell::Missing])]);
        assert_eq!(drop_blank_rows(&table).row_count(), 1);
    }

    #[test]
    fn sanitize_is_idempotent() {
        let (once, _) = sanitize(messy());
        let (twice, stats) = sanitize(once.clone());
        assert_eq!(once, twice);
        assert_eq!(stats.rows_dropped, 0);
        assert!(stats.dropped_columns.is_empty());
    }

    #[test]
    fn column_missing_only_in_surviving_rows_is_dropped() {
        let table = WorkingTable::new(vec![
            Column::plain("q1", vec![Cell::text("x"), Cell::Missing]),
            Column::plain("q2", vec![Cell::Missing, Cell::text(" ")]),
        ]);
        let (out, stats) = sanitize(table);
        assert_eq!(out.column_ids().collect::<Vec<_>>(), vec!["q1"]);
        assert_eq!(out.row_count(), 1);
        assert_eq!(stats.rows_dropped, 1);
    }

    #[test]
    fn table_can_become_empty() {
        let table = WorkingTable::new(vec![
            Column::plain("q1", vec![Cell::Missing, Cell::text("  ")]),
            Column::plain("q2", vec![Cell::Missing, Cell::Missing]),
        ]);
        let (out, stats) = sanitize(table);
        assert_eq!(out.row_count(), 0);
        assert_eq!(out.column_count(), 0);
        assert_eq!(stats.rows_dropped, 2);
        assert_eq!(stats.dropped_columns.len(), 2);

        assert_eq!(drop_missing_columns(WorkingTable::default()).column_count(), 0);
    }
}
