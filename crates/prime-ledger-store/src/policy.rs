//! Row-security gate consulted before every data operation.

use prime_ledger_core::{Caller, TableAction};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StoreError};

/// Checks whether `caller` may perform `action` on `table`.
///
/// Service callers bypass the gate entirely. Anonymous callers pass when
/// the table is absent from the row-security registry, when enforcement
/// is switched off, or when an installed policy grants the action.
pub(crate) fn check_access(
    conn: &Connection,
    caller: Caller,
    table: &str,
    action: TableAction,
) -> Result<()> {
    if caller.bypasses_row_security() {
        return Ok(());
    }
    if !row_security_enforced(conn, table)? {
        return Ok(());
    }
    if policy_exists(conn, table, action)? {
        return Ok(());
    }
    Err(StoreError::PolicyDenied {
        table: table.to_string(),
        action,
    })
}

fn row_security_enforced(conn: &Connection, table: &str) -> Result<bool> {
    let enforced = conn
        .query_row(
            "SELECT enforced FROM row_security WHERE table_name = ?1",
            params![table],
            |row| row.get::<_, bool>(0),
        )
        .optional()?;
    Ok(enforced.unwrap_or(false))
}

fn policy_exists(conn: &Connection, table: &str, action: TableAction) -> Result<bool> {
    let granted = conn.query_row(
        "SELECT COUNT(*) > 0 FROM access_policies WHERE table_name = ?1 AND action = ?2",
        params![table, action.as_str()],
        |row| row.get(0),
    )?;
    Ok(granted)
}

// ============================================================================
// Tests
// ============================================================================
