//! CSV / TSV reading.

use std::path::Path;

use crate::error::CleaningResult;
use crate::types::{Cell, RawTable};

/// Read a delimited text file into a [`RawTable`].
///
/// Rules:
///
/// - The first record is the header row.
/// - Records may be ragged; short records are padded with missing cells.
/// - An empty field is missing. A column whose non-blank fields all parse as finite numbers
///   becomes numeric; any other column keeps its fields as (untrimmed) text.
pub fn read_csv_table(path: impl AsRef<Path>, delimiter: u8) -> CleaningResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)?;
    read_csv_from_reader(&mut rdr)
}

/// Read CSV data from an existing reader built with `has_headers(true)`.
pub fn read_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> CleaningResult<RawTable> {
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for (row_idx, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() > columns.len() {
            columns.resize_with(record.len(), || vec![String::new(); row_idx]);
        }
        for (idx, col) in columns.iter_mut().enumerate() {
            col.push(record.get(idx).unwrap_or("").to_owned());
        }
    }

    let columns = columns.into_iter().map(typed_column).collect();
    Ok(RawTable::new(headers, columns))
}

fn typed_column(raw: Vec<String>) -> Vec<Cell> {
    let mut present = raw.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).peekable();
    let numeric = present.peek().is_some() && present.all(|s| parse_number(s).is_some());

    raw.into_iter()
        .map(|s| {
            if s.is_empty() {
                Cell::Missing
            } else if numeric {
                parse_number(s.trim()).map_or(Cell::Missing, Cell::Number)
            } else {
                Cell::Text(s)
            }
        })
        .collect()
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}
