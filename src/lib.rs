//! Ordered SQL batch execution over named `SQLite` stores, with results in
//! the positional JSON wire format of string-protocol plugin hosts.
//!
//! A batch call names a store, carries an ordered list of statements with
//! bind parameters, and flags whether the call is read-only. Each statement
//! is classified by its leading verb, dispatched to a query or mutation path,
//! and its outcome (rows, mutation counters, or a failure message) lands in
//! that statement's result slot. One failing statement never aborts its
//! siblings; callers that want atomicity put explicit `BEGIN`/`COMMIT`
//! statements in the batch.
//!
//! ```rust
//! use websql_bridge::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let bridge = WebsqlBridge::new(dir.path());
//! let wire = bridge.handle_call(
//!     r#"["inventory",
//!         [["CREATE TABLE t (a INTEGER, b TEXT)", []],
//!          ["INSERT INTO t VALUES (?1, ?2)", [1, "x"]],
//!          ["SELECT * FROM t", []]],
//!         false]"#,
//! )?;
//! assert!(wire.starts_with("[[null,"));
//! # Ok(()) }
//! ```

pub mod classify;
pub mod dispatch;
pub mod encoder;
pub mod error;
pub mod executor;
pub mod prelude;
pub mod registry;
pub mod sqlite;
pub mod types;

pub use classify::{StatementKind, classify_statement};
pub use dispatch::{WebsqlBridge, parse_batch_request};
pub use encoder::encode_batch_result;
pub use error::BridgeError;
pub use executor::execute_batch;
pub use registry::{StoreHandle, StoreRegistry};
pub use types::{
    BatchRequest, BatchResult, QueryAndParams, RowSet, StatementOutcome, WireValue,
};
