/// Values that cross the wire, as bind parameters or as result cells.
///
/// The wire protocol knows exactly four scalar categories (null, string,
/// boolean, number); numbers keep their integral/floating split internally so
/// the encoder can emit the right literal:
/// ```rust
/// use websql_bridge::prelude::*;
///
/// let params = vec![
///     WireValue::Int(1),
///     WireValue::Text("alice".into()),
///     WireValue::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// NULL value
    Null,
}

impl WireValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        if let WireValue::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let WireValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let WireValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        if let WireValue::Bool(value) = self {
            Some(*value)
        } else {
            None
        }
    }
}

/// A query and its bind parameters, bundled together.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAndParams {
    /// The SQL statement text.
    pub sql: String,
    /// Positional bind parameters, applied left to right.
    pub params: Vec<WireValue>,
}

impl QueryAndParams {
    /// Construct a query with bind parameters.
    #[must_use]
    pub fn new(sql: impl Into<String>, params: Vec<WireValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Construct a query with no bind parameters.
    #[must_use]
    pub fn new_without_params(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }
}

/// One ordered batch of statements bound for a single named store.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    /// Store name; resolves to a file under the registry root.
    pub store: String,
    /// Statements in execution order.
    pub queries: Vec<QueryAndParams>,
    /// When set, every non-select statement is rejected without executing.
    pub read_only: bool,
}

impl BatchRequest {
    #[must_use]
    pub fn new(store: impl Into<String>, queries: Vec<QueryAndParams>, read_only: bool) -> Self {
        Self {
            store: store.into(),
            queries,
            read_only,
        }
    }
}

/// Materialized rows from one select statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    /// Column names, in select-list order.
    pub columns: Vec<String>,
    /// Row values, aligned positionally with `columns`.
    pub rows: Vec<Vec<WireValue>>,
}

impl RowSet {
    /// Create a row set that will hold rows over `columns`.
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<WireValue>) {
        self.rows.push(row);
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a cell by row index and column name.
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<&WireValue> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(idx)
    }
}

/// The result of exactly one statement slot in a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementOutcome {
    /// A select ran; zero rows is still a success, as the empty row set.
    Rows(RowSet),
    /// A non-select ran. `insert_id` is set only on the insert path, where a
    /// negative id means no row was inserted.
    Mutation {
        rows_affected: usize,
        insert_id: Option<i64>,
    },
    /// The statement was rejected or failed; the batch carried on.
    Failure { message: String },
}

impl StatementOutcome {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    #[must_use]
    pub fn as_rows(&self) -> Option<&RowSet> {
        if let StatementOutcome::Rows(row_set) = self {
            Some(row_set)
        } else {
            None
        }
    }

    /// The failure message, if this slot failed.
    #[must_use]
    pub fn failure_message(&self) -> Option<&str> {
        if let StatementOutcome::Failure { message } = self {
            Some(message)
        } else {
            None
        }
    }
}

/// Ordered outcomes for one batch, exactly one per input query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    /// Outcomes in input-query order.
    pub outcomes: Vec<StatementOutcome>,
}

impl BatchResult {
    /// Number of outcome slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StatementOutcome> {
        self.outcomes.iter()
    }
}

impl From<Vec<StatementOutcome>> for BatchResult {
    fn from(outcomes: Vec<StatementOutcome>) -> Self {
        Self { outcomes }
    }
}
