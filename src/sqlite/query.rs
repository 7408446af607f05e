use rusqlite::types::Value;
use rusqlite::{Statement, ToSql};

use crate::error::BridgeError;
use crate::types::{RowSet, WireValue};

/// Convert one driver value into its wire category.
///
/// `SQLite` reports null, integer, real, text, or blob. The wire format has
/// no blob category, so blob bytes come back as text, decoded lossily as
/// UTF-8, which is how the host protocol transports them.
#[must_use]
pub fn sqlite_value_to_wire(value: Value) -> WireValue {
    match value {
        Value::Null => WireValue::Null,
        Value::Integer(i) => WireValue::Int(i),
        Value::Real(f) => WireValue::Float(f),
        Value::Text(s) => WireValue::Text(s),
        Value::Blob(b) => WireValue::Text(String::from_utf8_lossy(&b).into_owned()),
    }
}

/// Run a prepared select and materialize every row into a [`RowSet`].
///
/// A select that yields no rows produces the canonical empty result, with an
/// empty column list as well as an empty row list. That is a success, never a
/// failure.
///
/// # Errors
///
/// Returns `BridgeError::Sqlite` if binding, stepping, or value extraction
/// fails.
pub fn build_row_set(stmt: &mut Statement, params: &[Value]) -> Result<RowSet, BridgeError> {
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();

    let mut row_set = RowSet::new(column_names);
    let mut rows_iter = stmt.query(&param_refs[..])?;
    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            let value: Value = row.get(i)?;
            row_values.push(sqlite_value_to_wire(value));
        }
        row_set.add_row(row_values);
    }

    if row_set.is_empty() {
        return Ok(RowSet::default());
    }
    Ok(row_set)
}
