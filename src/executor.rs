//! Batch execution: ordered statement dispatch with per-statement failure
//! isolation and read-only enforcement.

use rusqlite::Connection;
use tracing::debug;

use crate::classify::{StatementKind, classify_statement};
use crate::error::BridgeError;
use crate::registry::StoreRegistry;
use crate::sqlite::{Params, build_row_set};
use crate::types::{BatchRequest, BatchResult, QueryAndParams, StatementOutcome};

/// Execute one ordered batch against one named store.
///
/// Per-statement problems, whether read-only rejections or driver errors,
/// land as [`StatementOutcome::Failure`] in that statement's slot and never
/// abort the batch; the result always holds exactly one outcome per input
/// query, in input order. The store's lock is held for the whole batch, so
/// statement N+1 observes the effects of statement N and concurrent batches
/// against the same store serialize.
///
/// No transaction is opened here. Each statement commits on its own, and a
/// caller that wants atomicity sends explicit `BEGIN`/`COMMIT` statements in
/// the batch.
///
/// # Errors
///
/// Returns `BridgeError::RequestMalformed` if the store name cannot name a
/// store, or `BridgeError::Sqlite` if the store cannot be opened. Both happen
/// before any statement runs; nothing else escapes as `Err`.
pub fn execute_batch(
    registry: &StoreRegistry,
    request: &BatchRequest,
) -> Result<BatchResult, BridgeError> {
    let handle = registry.resolve(&request.store)?;
    let conn = handle.lock();

    debug!(
        store = %request.store,
        queries = request.queries.len(),
        read_only = request.read_only,
        "executing batch"
    );

    let outcomes = request
        .queries
        .iter()
        .map(|query| run_statement(&conn, query, request.read_only))
        .collect();
    Ok(BatchResult { outcomes })
}

/// Run one statement slot; every failure path collapses into a `Failure`
/// outcome carrying the error's display text.
fn run_statement(conn: &Connection, query: &QueryAndParams, read_only: bool) -> StatementOutcome {
    let kind = classify_statement(&query.sql);

    // The read-only gate fires before anything is prepared or bound.
    if read_only && !kind.is_select() {
        return StatementOutcome::Failure {
            message: BridgeError::ReadOnlyViolation.to_string(),
        };
    }

    let result = match kind {
        StatementKind::Select => run_select(conn, query),
        mutation => run_mutation(conn, query, mutation),
    };
    match result {
        Ok(outcome) => outcome,
        Err(err) => StatementOutcome::Failure {
            message: err.to_string(),
        },
    }
}

fn run_select(conn: &Connection, query: &QueryAndParams) -> Result<StatementOutcome, BridgeError> {
    debug!(sql = %query.sql, "select statement");
    let params = Params::convert(&query.params);
    let mut stmt = conn.prepare(&query.sql)?;
    let row_set = build_row_set(&mut stmt, params.as_values())?;
    Ok(StatementOutcome::Rows(row_set))
}

fn run_mutation(
    conn: &Connection,
    query: &QueryAndParams,
    kind: StatementKind,
) -> Result<StatementOutcome, BridgeError> {
    debug!(sql = %query.sql, ?kind, "mutation statement");
    let params = Params::convert(&query.params);
    let mut stmt = conn.prepare(&query.sql)?;
    let param_refs = params.as_refs();

    match kind {
        StatementKind::Insert => {
            let changed = stmt.execute(&param_refs[..])?;
            // A generated id below zero means nothing was inserted, and the
            // id and affected count must agree on that.
            let insert_id = if changed > 0 {
                conn.last_insert_rowid()
            } else {
                -1
            };
            Ok(StatementOutcome::Mutation {
                rows_affected: usize::from(insert_id >= 0),
                insert_id: Some(insert_id),
            })
        }
        StatementKind::Update | StatementKind::Delete => {
            let rows_affected = stmt.execute(&param_refs[..])?;
            Ok(StatementOutcome::Mutation {
                rows_affected,
                insert_id: None,
            })
        }
        // DDL, pragmas, transaction control. Run for effect with a single
        // step so row-returning statements (e.g. PRAGMA) do not error, and
        // report no counters; they are meaningless here. Select never routes
        // to this function.
        StatementKind::Select | StatementKind::Other => {
            let mut rows = stmt.query(&param_refs[..])?;
            let _ = rows.next()?;
            Ok(StatementOutcome::Mutation {
                rows_affected: 0,
                insert_id: None,
            })
        }
    }
}
