use thiserror::Error;

/// Unified error type for the bridge.
///
/// Driver errors stay transparent so a per-statement failure slot carries the
/// `SQLite` message verbatim. `ReadOnlyViolation` renders as the fixed
/// rejection string that WebSQL-family callers match on, so its text must not
/// change.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("could not prepare statement (23 not authorized)")]
    ReadOnlyViolation,

    #[error("malformed batch request: {0}")]
    RequestMalformed(String),

    #[error("result encoding error: {0}")]
    Encoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only_violation_renders_fixed_message() {
        assert_eq!(
            BridgeError::ReadOnlyViolation.to_string(),
            "could not prepare statement (23 not authorized)"
        );
    }

    #[test]
    fn sqlite_errors_pass_through_untouched() {
        let driver = rusqlite::Error::InvalidParameterName("x".to_owned());
        let wrapped = BridgeError::from(rusqlite::Error::InvalidParameterName("x".to_owned()));
        assert_eq!(wrapped.to_string(), driver.to_string());
    }
}
