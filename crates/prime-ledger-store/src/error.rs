//! Error types for the ledger store.
//!
//! Constraint failures raised by the engine are mapped onto dedicated
//! variants so callers can distinguish a duplicate `transaction_id` from
//! a missing required field without parsing error strings.

use prime_ledger_core::TableAction;
use rusqlite::ffi;
use thiserror::Error;

/// Errors surfaced by ledger store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Row security is enforced on the table and no installed policy
    /// grants the attempted action.
    #[error("row security denies {action} on {table}")]
    PolicyDenied {
        /// Table the caller tried to touch.
        table: String,
        /// Action that was refused.
        action: TableAction,
    },

    /// A `UNIQUE` or `PRIMARY KEY` constraint rejected a write.
    #[error("unique constraint violated on {constraint}")]
    UniqueViolation {
        /// Qualified column the engine reported, e.g.
        /// `payments.transaction_id`.
        constraint: String,
    },

    /// A `NOT NULL` constraint rejected a write.
    #[error("not-null constraint violated on {column}")]
    NotNullViolation {
        /// Qualified column the engine reported, e.g.
        /// `contact_requests.program`.
        column: String,
    },

    /// Any other engine failure.
    #[error("database error: {0}")]
    Database(rusqlite::Error),
}

/// Convenience alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, Some(ref message)) = err {
            match code.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return Self::UniqueViolation {
                        constraint: constraint_target(message),
                    };
                }
                ffi::SQLITE_CONSTRAINT_NOTNULL => {
                    return Self::NotNullViolation {
                        column: constraint_target(message),
                    };
                }
                _ => {}
            }
        }
        Self::Database(err)
    }
}

/// Pulls `payments.transaction_id` out of
/// `"UNIQUE constraint failed: payments.transaction_id"`.
fn constraint_target(message: &str) -> String {
    message.rsplit(": ").next().unwrap_or(message).to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use rusqlite::Connection;

    fn scratch() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (id TEXT PRIMARY KEY, tag TEXT NOT NULL UNIQUE, body TEXT NOT NULL)",
        )
        .unwrap();
        conn
    }

    #[test]
    fn unique_violations_name_the_constraint() {
        let conn = scratch();
        conn.execute("INSERT INTO t (id, tag, body) VALUES ('a', 'x', 'hi')", [])
            .unwrap();
        let err = conn
            .execute("INSERT INTO t (id, tag, body) VALUES ('b', 'x', 'hi')", [])
            .unwrap_err();
        match StoreError::from(err) {
            StoreError::UniqueViolation { constraint } => assert_eq!(constraint, "t.tag"),
            other => panic!("expected unique violation, got {other}"),
        }
    }

    #[test]
    fn primary_key_conflicts_count_as_unique_violations() {
        let conn = scratch();
        conn.execute("INSERT INTO t (id, tag, body) VALUES ('a', 'x', 'hi')", [])
            .unwrap();
        let err = conn
            .execute("INSERT INTO t (id, tag, body) VALUES ('a', 'y', 'hi')", [])
            .unwrap_err();
        match StoreError::from(err) {
            StoreError::UniqueViolation { constraint } => assert_eq!(constraint, "t.id"),
            other => panic!("expected unique violation, got {other}"),
        }
    }

    #[test]
    fn not_null_violations_name_the_column() {
        let conn = scratch();
        let err = conn
            .execute("INSERT INTO t (id, tag) VALUES ('a', 'x')", [])
            .unwrap_err();
        match StoreError::from(err) {
            StoreError::NotNullViolation { column } => assert_eq!(column, "t.body"),
            other => panic!("expected not-null violation, got {other}"),
        }
    }

    #[test]
    fn unrelated_errors_pass_through() {
        let conn = scratch();
        let err = conn
            .execute("INSERT INTO missing (x) VALUES (1)", [])
            .unwrap_err();
        assert!(matches!(StoreError::from(err), StoreError::Database(_)));
    }

    #[test]
    fn policy_denied_reads_naturally() {
        let err = StoreError::PolicyDenied {
            table: "contact_requests".into(),
            action: TableAction::Select,
        };
        assert_eq!(err.to_string(), "row security denies select on contact_requests");
    }
}
