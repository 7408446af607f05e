//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::classify::{StatementKind, classify_statement};
pub use crate::dispatch::{WebsqlBridge, parse_batch_request};
pub use crate::encoder::encode_batch_result;
pub use crate::error::BridgeError;
pub use crate::executor::execute_batch;
pub use crate::registry::{StoreHandle, StoreRegistry};
pub use crate::types::{
    BatchRequest, BatchResult, QueryAndParams, RowSet, StatementOutcome, WireValue,
};
