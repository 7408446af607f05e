//! Wire encoding for batch results.
//!
//! Each statement outcome is the fixed positional quintuple
//! `[errorMessageOrNull, insertId, rowsAffected, [columnName, ...],
//! [[rowValue, ...], ...]]`, and a batch is the outer array of quintuples.
//! The impls here serialize positionally and stream straight into the output
//! string, with no intermediate JSON value tree, while staying byte-for-byte
//! compatible with a standard JSON serializer fed the equivalent value.

use serde::ser::{Serialize, SerializeTuple, Serializer};
use tracing::trace;

use crate::error::BridgeError;
use crate::types::{BatchResult, StatementOutcome, WireValue};

const NO_COLUMNS: [&str; 0] = [];
const NO_ROWS: [[WireValue; 0]; 0] = [];

impl Serialize for WireValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            WireValue::Null => serializer.serialize_unit(),
            WireValue::Int(i) => serializer.serialize_i64(*i),
            WireValue::Float(f) => serializer.serialize_f64(*f),
            WireValue::Text(s) => serializer.serialize_str(s),
            WireValue::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl Serialize for StatementOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut entry = serializer.serialize_tuple(5)?;
        match self {
            StatementOutcome::Rows(row_set) => {
                entry.serialize_element(&())?;
                entry.serialize_element(&0_i64)?;
                entry.serialize_element(&0_usize)?;
                entry.serialize_element(&row_set.columns)?;
                entry.serialize_element(&row_set.rows)?;
            }
            StatementOutcome::Mutation {
                rows_affected,
                insert_id,
            } => {
                entry.serialize_element(&())?;
                entry.serialize_element(&insert_id.unwrap_or(0))?;
                entry.serialize_element(rows_affected)?;
                entry.serialize_element(&NO_COLUMNS)?;
                entry.serialize_element(&NO_ROWS)?;
            }
            StatementOutcome::Failure { message } => {
                entry.serialize_element(message)?;
                entry.serialize_element(&0_i64)?;
                entry.serialize_element(&0_usize)?;
                entry.serialize_element(&NO_COLUMNS)?;
                entry.serialize_element(&NO_ROWS)?;
            }
        }
        entry.end()
    }
}

impl Serialize for BatchResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.outcomes.serialize(serializer)
    }
}

/// Render a batch result as the single wire string handed back to the host.
///
/// # Errors
///
/// Returns `BridgeError::Encoding` if serialization fails. Not reachable for
/// outcomes this crate produces, but kept as an error rather than a panic.
pub fn encode_batch_result(batch: &BatchResult) -> Result<String, BridgeError> {
    let payload =
        serde_json::to_string(batch).map_err(|e| BridgeError::Encoding(e.to_string()))?;
    trace!(bytes = payload.len(), "encoded batch result");
    Ok(payload)
}
