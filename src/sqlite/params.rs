use crate::types::WireValue;

/// Convert a single wire value to the rusqlite `Value` actually bound.
///
/// Everything non-null binds as text. The wire protocol's callers send
/// scalars whose native type was already flattened to strings once, and the
/// store's column affinity rules turn the text back into the column's type on
/// insert or comparison. Only explicit null survives as null; the retrieval
/// direction is the type-preserving one.
#[must_use]
pub fn wire_value_to_sqlite_value(value: &WireValue) -> rusqlite::types::Value {
    match value {
        WireValue::Null => rusqlite::types::Value::Null,
        WireValue::Text(s) => rusqlite::types::Value::Text(s.clone()),
        WireValue::Int(i) => rusqlite::types::Value::Text(i.to_string()),
        WireValue::Float(f) => rusqlite::types::Value::Text(float_wire_text(*f)),
        WireValue::Bool(b) => rusqlite::types::Value::Text(b.to_string()),
    }
}

// Format a float the way the wire encoder prints it, so a value bound in and
// a value encoded out spell the same text ("1.0" stays "1.0", not "1").
fn float_wire_text(f: f64) -> String {
    serde_json::Number::from_f64(f).map_or_else(|| f.to_string(), |n| n.to_string())
}

/// Unified `SQLite` parameter container for one statement.
pub struct Params(pub Vec<rusqlite::types::Value>);

impl Params {
    /// Coerce wire parameters into `SQLite` bind values.
    #[must_use]
    pub fn convert(params: &[WireValue]) -> Self {
        Params(params.iter().map(wire_value_to_sqlite_value).collect())
    }

    /// Borrow the underlying values.
    #[must_use]
    pub fn as_values(&self) -> &[rusqlite::types::Value] {
        &self.0
    }

    /// Build a borrowed params slice suitable for rusqlite execution.
    #[must_use]
    pub fn as_refs(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.0.iter().map(|v| v as &dyn rusqlite::ToSql).collect()
    }
}
