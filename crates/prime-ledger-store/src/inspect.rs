//! Read-only views of the applied definition.
//!
//! These report catalog state, not row data, so they take no caller:
//! which tables, indexes, registrations, and policies exist is not
//! itself gated.

use rusqlite::Row;
use serde::Serialize;

use crate::error::Result;
use crate::Store;

/// One row of the access policy catalog, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyRow {
    /// Table the policy applies to.
    pub table_name: String,
    /// Policy name, unique per table.
    pub policy_name: String,
    /// Granted action, `insert` or `select`.
    pub action: String,
    /// Role the grant targets; always `public` in the shipped definition.
    pub role: String,
}

impl Store {
    /// Names of all user tables, sorted.
    ///
    /// # Errors
    /// `StoreError::Database` if the catalog query fails.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Names of all named indexes, sorted. Implicit indexes backing
    /// `UNIQUE` and `PRIMARY KEY` constraints are not listed.
    ///
    /// # Errors
    /// `StoreError::Database` if the catalog query fails.
    pub fn index_names(&self) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'index' AND name LIKE 'idx_%' ORDER BY name",
        )?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Tables currently registered with enforcement on, sorted.
    ///
    /// # Errors
    /// `StoreError::Database` if the catalog query fails.
    pub fn row_security_tables(&self) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT table_name FROM row_security WHERE enforced ORDER BY table_name",
        )?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// The installed policy catalog, sorted by table then policy name.
    ///
    /// # Errors
    /// `StoreError::Database` if the catalog query fails.
    pub fn policies(&self) -> Result<Vec<PolicyRow>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT table_name, policy_name, action, role FROM access_policies \
             ORDER BY table_name, policy_name",
        )?;
        let rows = stmt.query_map([], row_to_policy)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

fn row_to_policy(row: &Row<'_>) -> rusqlite::Result<PolicyRow> {
    Ok(PolicyRow {
        table_name: row.get("table_name")?,
        policy_name: row.get("policy_name")?,
        action: row.get("action")?,
        role: row.get("role")?,
    })
}

// ============================================================================
// Tests
// ============================================================================
