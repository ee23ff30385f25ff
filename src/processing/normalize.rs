//! Column name normalization.

use crate::types::{Column, NameMapping, RawTable, WorkingTable, short_id};

/// Clean a header cell: trim and collapse internal whitespace runs into a single space.
///
/// Duplicate headers are left alone; uniqueness comes from the positional short ids.
pub fn clean_header(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rename every column to its positional short id (`q1`, `q2`, ...).
///
/// Returns the renamed table together with the mapping back to the cleaned original
/// headers. Cell contents are not touched. A table without columns yields an empty table
/// and an empty mapping.
pub fn normalize_names(raw: RawTable) -> (WorkingTable, NameMapping) {
    let (headers, columns) = raw.into_parts();
    let mapping = NameMapping::from_headers(headers.iter().map(|h| clean_header(h)));

    let columns = columns
        .into_iter()
        .enumerate()
        .map(|(idx, cells)| Column::plain(short_id(idx), cells))
        .collect();

    (WorkingTable::new(columns), mapping)
}

#[cfg(test)]
mod tests {
    use super::{clean_header, normalize_names};
    use crate::types::{Cell, RawTable};

    fn survey() -> RawTable {
        RawTable::from_rows(
            vec![
                "How old are you?".to_string(),
                "  Favorite   Color ".to_string(),
                "Notes".to_string(),
            ],
            vec![
                vec![Cell::Number(34.0), Cell::text(" Blue"), Cell::Missing],
                vec![Cell::Number(28.0), Cell::text("Red"), Cell::text("late")],
            ],
        )
    }

    #[test]
    fn clean_header_trims_and_collapses_whitespace() {
        assert_eq!(clean_header("  Favorite \t Color \n"), "Favorite Color");
        assert_eq!(clean_header("Age"), "Age");
        assert_eq!(clean_header("   "), "");
    }

    #[test]
    fn short_ids_follow_header_order() {
        let (table, mapping) = normalize_names(survey());

        let ids: Vec<&str> = table.column_ids().collect();
        assert_eq!(ids, vec!["q1", "q2", "q3"]);
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping.header_for("q1"), Some("How old are you?"));
        assert_eq!(mapping.header_for("q2"), Some("Favorite Color"));
        assert_eq!(mapping.header_for("q3"), Some("Notes"));
        assert_eq!(mapping.header_for("q4"), None);
    }

    #[test]
    fn cells_are_unchanged() {
        let raw = survey();
        let expected = raw.columns().to_vec();
        let (table, _) = normalize_names(raw);

        for (col, cells) in table.columns().iter().zip(expected) {
            assert_eq!(col.cells(), cells.as_slice());
            assert!(col.label.is_none());
        }
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn duplicate_and_blank_headers_still_get_unique_ids() {
        let raw = RawTable::from_rows(
            vec!["Q".to_string(), "Q".to_string(), String::new()],
            vec![vec![Cell::Number(1.0), Cell::Number(2.0), Cell::Number(3.0)]],
        );
        let (table, mapping) = normalize_names(raw);

        assert_eq!(table.column_ids().collect::<Vec<_>>(), vec!["q1", "q2", "q3"]);
        assert_eq!(mapping.header_for("q1"), Some("Q"));
        assert_eq!(mapping.header_for("q2"), Some("Q"));
        assert_eq!(mapping.header_for("q3"), Some(""));
    }

    #[test]
    fn empty_table_yields_empty_mapping() {
        let (table, mapping) = normalize_names(RawTable::default());
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
        assert!(mapping.is_empty());
    }
}
