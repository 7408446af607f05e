//! Statement classification by leading verb.
//!
//! The classifier decides two things per statement: which execution path runs
//! it (query vs. mutation) and whether read-only mode may reject it. It is a
//! plain prefix match, not a parser; anything it does not recognize takes the
//! generic path and the driver has the final word.

/// The dispatch-relevant kind of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    /// Everything else: DDL, pragmas, transaction control, or garbage.
    Other,
}

impl StatementKind {
    /// The only kind read-only mode lets through.
    #[must_use]
    pub fn is_select(self) -> bool {
        matches!(self, Self::Select)
    }
}

/// Classify a statement by its leading verb.
///
/// Leading whitespace is skipped and the comparison is ASCII
/// case-insensitive, but no tokenizer runs: leading SQL comments are not
/// stripped, so a statement opening with `-- note` classifies as
/// [`StatementKind::Other`] and simply takes the generic path.
#[must_use]
pub fn classify_statement(sql: &str) -> StatementKind {
    let stmt = sql.trim_start();
    if starts_with_verb(stmt, "select") {
        StatementKind::Select
    } else if starts_with_verb(stmt, "insert") {
        StatementKind::Insert
    } else if starts_with_verb(stmt, "update") {
        StatementKind::Update
    } else if starts_with_verb(stmt, "delete") {
        StatementKind::Delete
    } else {
        StatementKind::Other
    }
}

fn starts_with_verb(stmt: &str, verb: &str) -> bool {
    // `get` keeps the slice on a char boundary for non-ASCII input.
    stmt.get(..verb.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(verb))
}
