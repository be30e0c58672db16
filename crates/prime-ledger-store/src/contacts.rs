//! Contact request operations.
//!
//! Writes are open to the public; reads are not. No installed policy
//! grants select on `contact_requests`, so the backlog of callback
//! requests is only visible to the service role.

use chrono::Utc;
use prime_ledger_core::{Caller, ContactId, ContactRequest, NewContactRequest, TableAction};
use rusqlite::types::Type;
use rusqlite::{params, Row};

use crate::error::Result;
use crate::policy::check_access;
use crate::schema::table;
use crate::Store;

const CONTACT_COLUMNS: &str = "id, program, contact_method, requester_ip, user_agent, created_at";

impl Store {
    /// Records a callback request and returns its id.
    ///
    /// Required fields left as `None` are bound as NULL and rejected by
    /// the engine; nothing is validated up front.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` when the caller lacks an insert grant,
    /// `StoreError::NotNullViolation` when `program` or `contact_method`
    /// is missing, and `StoreError::Database` for any other failure.
    pub fn record_contact(&self, caller: Caller, new: &NewContactRequest) -> Result<ContactId> {
        let conn = self.conn();
        check_access(&conn, caller, table::CONTACT_REQUESTS, TableAction::Insert)?;

        let id = ContactId::generate();
        conn.execute(
            "INSERT INTO contact_requests (id, program, contact_method, requester_ip, \
                                           user_agent, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id.to_string(),
                new.program,
                new.contact_method,
                new.requester_ip,
                new.user_agent,
                Utc::now(),
            ],
        )?;
        tracing::debug!(id = %id, "contact request recorded");
        Ok(id)
    }

    /// Lists every contact request, newest first.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` for anonymous callers, since no policy
    /// grants select here; otherwise `StoreError::Database`.
    pub fn list_contacts(&self, caller: Caller) -> Result<Vec<ContactRequest>> {
        let conn = self.conn();
        check_access(&conn, caller, table::CONTACT_REQUESTS, TableAction::Select)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_requests ORDER BY created_at DESC"
        ))?;
        let rows = stmt.query_map([], row_to_contact)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Contact requests for one program, newest first.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` for anonymous callers, otherwise
    /// `StoreError::Database`.
    pub fn list_contacts_by_program(
        &self,
        caller: Caller,
        program: &str,
    ) -> Result<Vec<ContactRequest>> {
        let conn = self.conn();
        check_access(&conn, caller, table::CONTACT_REQUESTS, TableAction::Select)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_requests \
             WHERE program = ?1 ORDER BY created_at DESC"
        ))?;
        let rows = stmt.query_map(params![program], row_to_contact)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Number of recorded contact requests.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` for anonymous callers, otherwise
    /// `StoreError::Database`.
    pub fn count_contacts(&self, caller: Caller) -> Result<u64> {
        let conn = self.conn();
        check_access(&conn, caller, table::CONTACT_REQUESTS, TableAction::Select)?;
        let count = conn.query_row("SELECT COUNT(*) FROM contact_requests", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn row_to_contact(row: &Row<'_>) -> rusqlite::Result<ContactRequest> {
    let id: String = row.get("id")?;
    Ok(ContactRequest {
        id: id
            .parse::<ContactId>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?,
        program: row.get("program")?,
        contact_method: row.get("contact_method")?,
        requester_ip: row.get("requester_ip")?,
        user_agent: row.get("user_agent")?,
        created_at: row.get("created_at")?,
    })
}

// ============================================================================
// Tests
// ============================================================================
