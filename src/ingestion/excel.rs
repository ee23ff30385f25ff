use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::error::CleaningResult;
use crate::types::{Cell, RawTable};

/// Read one sheet of a workbook (`.xlsx`, `.xls`, `.ods`, etc.) into a [`RawTable`].
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - Every later row becomes a data row, blank rows included (the sanitizer drops them)
/// - A sheet without any non-empty row yields an empty table
pub fn read_excel_table(path: impl AsRef<Path>, sheet_name: Option<&str>) -> CleaningResult<RawTable> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet = match sheet_name {
        Some(name) => name.to_owned(),
        None => match workbook.sheet_names().first() {
            Some(name) => name.clone(),
            None => return Ok(RawTable::default()),
        },
    };

    let range = workbook.worksheet_range(&sheet)?;
    Ok(table_from_range(&range))
}

/// Convert a worksheet range into a [`RawTable`], using its first non-empty row as headers.
pub fn table_from_range(range: &Range<Data>) -> RawTable {
    let mut rows = range
        .rows()
        .skip_while(|row| row.iter().all(|c| matches!(c, Data::Empty)));

    let Some(header_row) = rows.next() else {
        return RawTable::default();
    };
    let headers = header_row.iter().map(cell_to_header_string).collect();
    let body = rows.map(|row| row.iter().map(convert_cell).collect()).collect();

    RawTable::from_rows(headers, body)
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => crate::types::format_number(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => crate::types::format_number(dt.as_f64()),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

fn convert_cell(c: &Data) -> Cell {
    match c {
        Data::Empty | Data::Error(_) => Cell::Missing,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        // Date cells keep their spreadsheet serial value.
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use calamine::{Data, Range};

    use super::table_from_range;
    use crate::types::Cell;

    fn range(rows: Vec<Vec<Data>>) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let mut r = Range::new((0, 0), (height - 1, width - 1));
        for (ri, row) in rows.into_iter().enumerate() {
            for (ci, v) in row.into_iter().enumerate() {
                r.set_value((ri as u32, ci as u32), v);
            }
        }
        r
    }

    #[test]
    fn header_is_first_non_empty_row() {
        let r = range(vec![
            vec![Data::Empty, Data::Empty],
            vec![Data::String("Age".to_string()), Data::String("Color ".to_string())],
            vec![Data::Float(34.0), Data::String("Blue".to_string())],
            vec![Data::Empty, Data::Empty],
            vec![Data::Int(28), Data::Bool(true)],
        ]);

        let t = table_from_range(&r);
        assert_eq!(t.headers(), &["Age", "Color "]);
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.columns()[0], vec![Cell::Number(34.0), Cell::Missing, Cell::Number(28.0)]);
        assert_eq!(
            t.columns()[1],
            vec![Cell::text("Blue"), Cell::Missing, Cell::text("true")]
        );
    }

    #[test]
    fn blank_sheet_yields_empty_table() {
        let r = range(vec![vec![Data::Empty], vec![Data::Empty]]);
        let t = table_from_range(&r);
        assert_eq!(t.column_count(), 0);
        assert_eq!(t.row_count(), 0);
    }
}
