use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{EngineError, Result};

/// One flat row handed to the renderer: column name to scalar.
pub type Record = Map<String, Value>;

/// Serializes typed rows into records. Field names (after serde renames) become
/// column names.
pub fn to_records<T: Serialize>(rows: &[T]) -> Result<Vec<Record>> {
    rows.iter()
        .map(|row| match serde_json::to_value(row)? {
            Value::Object(record) => Ok(record),
            other => Err(EngineError::InvalidRecord(other.to_string())),
        })
        .collect()
}

/// Text form of a cell, as used for legend entries, facet titles and path segments.
pub fn cell_label(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
