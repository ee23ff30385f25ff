//! Parquet output.
//!
//! Column mapping:
//!
//! - categorical -> `Dictionary(Int32, Utf8)`, dictionary values = level set in order
//! - numeric plain column -> `Float64`
//! - any other plain column -> `Utf8` (numbers stringified the same way as levels)
//!
//! Every field carries metadata: `label` (variable label, or the id if none is attached),
//! `kind` (`categorical` / `numeric` / `text`) and, for categorical columns, `levels` (JSON
//! array). Parquet may re-encode dictionaries, so readers should take level order from the
//! `levels` metadata.

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use ::parquet::arrow::ArrowWriter;
use arrow::array::{ArrayRef, DictionaryArray, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Int32Type, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};

use super::SinkError;
use crate::types::{CategoricalColumn, Cell, Column, ColumnData, VariableKind, WorkingTable};

/// Field metadata key holding the variable label.
pub const LABEL_KEY: &str = "label";
/// Field metadata key holding the [`VariableKind`].
pub const KIND_KEY: &str = "kind";
/// Field metadata key holding the JSON-encoded level set.
pub const LEVELS_KEY: &str = "levels";

/// Serialize `table` as a single-row-group Parquet file into `writer`.
///
/// A table without columns is written with an empty schema.
pub fn write_parquet<W: Write + Send>(table: &WorkingTable, writer: W) -> Result<(), SinkError> {
    let batch = to_record_batch(table)?;
    let mut w = ArrowWriter::try_new(writer, batch.schema(), None)?;
    w.write(&batch)?;
    w.close()?;
    Ok(())
}

/// Convert `table` into an Arrow [`RecordBatch`] with labeled fields.
pub fn to_record_batch(table: &WorkingTable) -> Result<RecordBatch, SinkError> {
    let mut fields: Vec<Field> = Vec::with_capacity(table.column_count());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(table.column_count());

    for col in table.columns() {
        let kind = col.kind();
        let mut metadata = field_metadata(col, kind);

        let (data_type, array): (DataType, ArrayRef) = match &col.data {
            ColumnData::Categorical(cat) => {
                metadata.insert(LEVELS_KEY.to_string(), serde_json::to_string(cat.levels())?);
                (
                    DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8)),
                    Arc::new(dictionary_array(&col.id, cat)?),
                )
            }
            ColumnData::Plain(cells) if kind == VariableKind::Numeric => {
                let values: Vec<Option<f64>> = cells
                    .iter()
                    .map(|c| match c {
                        Cell::Number(v) => Some(*v),
                        _ => None,
                    })
                    .collect();
                (DataType::Float64, Arc::new(Float64Array::from(values)))
            }
            ColumnData::Plain(cells) => {
                let values: Vec<Option<String>> = cells.iter().map(Cell::as_level).collect();
                (DataType::Utf8, Arc::new(StringArray::from(values)))
            }
        };

        fields.push(Field::new(col.id.as_str(), data_type, true).with_metadata(metadata));
        arrays.push(array);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(table.row_count()));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        arrays,
        &options,
    )?)
}

fn field_metadata(col: &Column, kind: VariableKind) -> HashMap<String, String> {
    let label = col.label.clone().unwrap_or_else(|| col.id.clone());
    HashMap::from([
        (LABEL_KEY.to_string(), label),
        (KIND_KEY.to_string(), kind.as_str().to_string()),
    ])
}

fn dictionary_array(id: &str, cat: &CategoricalColumn) -> Result<DictionaryArray<Int32Type>, SinkError> {
    let keys = cat
        .codes()
        .into_iter()
        .map(|code| code.map(i32::try_from).transpose())
        .collect::<Result<Vec<Option<i32>>, _>>()
        .map_err(|_| SinkError::Unsupported(format!("column '{id}' has too many levels")))?;
    let values: ArrayRef = Arc::new(StringArray::from(cat.levels().to_vec()));
    Ok(DictionaryArray::try_new(Int32Array::from(keys), values)?)
}
