//! Program catalog reads.
//!
//! The catalog carries no row-security registration, so any caller can
//! read it. Rows only enter through the seed step of
//! [`Store::apply_definition`](crate::Store::apply_definition).

use prime_ledger_core::{Caller, Program, ProgramId, TableAction};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use crate::error::Result;
use crate::policy::check_access;
use crate::schema::table;
use crate::Store;

const PROGRAM_COLUMNS: &str = "id, name, price, original_price, description, \
                               contact_phone, contact_whatsapp, features, created_at";

impl Store {
    /// Lists the catalog, cheapest program first.
    ///
    /// # Errors
    /// `StoreError::Database` if the query fails.
    pub fn list_programs(&self, caller: Caller) -> Result<Vec<Program>> {
        let conn = self.conn();
        check_access(&conn, caller, table::PROGRAMS, TableAction::Select)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs ORDER BY price ASC, name ASC"
        ))?;
        let rows = stmt.query_map([], row_to_program)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Looks a program up by its (unique) name.
    ///
    /// # Errors
    /// `StoreError::Database` if the query fails.
    pub fn get_program_by_name(&self, caller: Caller, name: &str) -> Result<Option<Program>> {
        let conn = self.conn();
        check_access(&conn, caller, table::PROGRAMS, TableAction::Select)?;
        let program = conn
            .query_row(
                &format!("SELECT {PROGRAM_COLUMNS} FROM programs WHERE name = ?1"),
                params![name],
                row_to_program,
            )
            .optional()?;
        Ok(program)
    }
}

fn row_to_program(row: &Row<'_>) -> rusqlite::Result<Program> {
    let id: String = row.get("id")?;
    let features: Option<serde_json::Value> = row.get("features")?;
    Ok(Program {
        id: id
            .parse::<ProgramId>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?,
        name: row.get("name")?,
        price: row.get("price")?,
        original_price: row.get("original_price")?,
        description: row.get("description")?,
        contact_phone: row.get("contact_phone")?,
        contact_whatsapp: row.get("contact_whatsapp")?,
        features: features.unwrap_or(serde_json::Value::Null),
        created_at: row.get("created_at")?,
    })
}

// ============================================================================
// Tests
// ============================================================================
