//! Payment operations.
//!
//! Inserts mint the row id and both timestamps on the application side,
//! so a freshly recorded [`Payment`] reads back byte-for-byte identical.
//! `updated_at` starts equal to `created_at` and no operation in this
//! module ever touches it again.

use chrono::Utc;
use prime_ledger_core::{Caller, NewPayment, Payment, PaymentId, TableAction};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use crate::error::Result;
use crate::policy::check_access;
use crate::schema::table;
use crate::Store;

pub(crate) const PAYMENT_COLUMNS: &str = "id, program, payer_name, email, phone, transaction_id, \
                                          amount, currency, method, status, created_at, updated_at";

impl Store {
    /// Records a completed payment and returns the stored row.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` when the caller lacks an insert grant,
    /// `StoreError::UniqueViolation` on a duplicate `transaction_id`, and
    /// `StoreError::Database` for any other engine failure.
    pub fn insert_payment(&self, caller: Caller, new: &NewPayment) -> Result<Payment> {
        let conn = self.conn();
        check_access(&conn, caller, table::PAYMENTS, TableAction::Insert)?;

        let payment = new.clone().into_payment(PaymentId::generate(), Utc::now());
        conn.execute(
            "INSERT INTO payments (id, program, payer_name, email, phone, transaction_id, \
                                   amount, currency, method, status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                payment.id.to_string(),
                payment.program,
                payment.payer_name,
                payment.email,
                payment.phone,
                payment.transaction_id,
                payment.amount,
                payment.currency,
                payment.method,
                payment.status,
                payment.created_at,
                payment.updated_at,
            ],
        )?;
        tracing::debug!(
            id = %payment.id,
            transaction = %payment.transaction_id,
            amount = payment.amount,
            "payment recorded"
        );
        Ok(payment)
    }

    /// Lists every payment, newest first.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` when the caller lacks a select grant,
    /// otherwise `StoreError::Database`.
    pub fn list_payments(&self, caller: Caller) -> Result<Vec<Payment>> {
        let conn = self.conn();
        check_access(&conn, caller, table::PAYMENTS, TableAction::Select)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments ORDER BY created_at DESC"
        ))?;
        let rows = stmt.query_map([], row_to_payment)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Looks a payment up by its (unique) transaction id.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` when the caller lacks a select grant,
    /// otherwise `StoreError::Database`.
    pub fn get_payment_by_transaction(
        &self,
        caller: Caller,
        transaction_id: &str,
    ) -> Result<Option<Payment>> {
        let conn = self.conn();
        check_access(&conn, caller, table::PAYMENTS, TableAction::Select)?;
        let payment = conn
            .query_row(
                &format!("SELECT {PAYMENT_COLUMNS} FROM payments WHERE transaction_id = ?1"),
                params![transaction_id],
                row_to_payment,
            )
            .optional()?;
        Ok(payment)
    }

    /// All payments recorded under `email`, newest first.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` when the caller lacks a select grant,
    /// otherwise `StoreError::Database`.
    pub fn find_payments_by_email(&self, caller: Caller, email: &str) -> Result<Vec<Payment>> {
        self.payments_where(caller, "email", email)
    }

    /// All payments for one program, newest first.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` when the caller lacks a select grant,
    /// otherwise `StoreError::Database`.
    pub fn list_payments_by_program(&self, caller: Caller, program: &str) -> Result<Vec<Payment>> {
        self.payments_where(caller, "program", program)
    }

    /// All payments in one status, newest first.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` when the caller lacks a select grant,
    /// otherwise `StoreError::Database`.
    pub fn list_payments_by_status(&self, caller: Caller, status: &str) -> Result<Vec<Payment>> {
        self.payments_where(caller, "status", status)
    }

    /// Number of recorded payments.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` when the caller lacks a select grant,
    /// otherwise `StoreError::Database`.
    pub fn count_payments(&self, caller: Caller) -> Result<u64> {
        let conn = self.conn();
        check_access(&conn, caller, table::PAYMENTS, TableAction::Select)?;
        let count = conn.query_row("SELECT COUNT(*) FROM payments", [], |row| row.get(0))?;
        Ok(count)
    }

    /// One equality filter over an indexed column.
    fn payments_where(&self, caller: Caller, column: &str, value: &str) -> Result<Vec<Payment>> {
        let conn = self.conn();
        check_access(&conn, caller, table::PAYMENTS, TableAction::Select)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE {column} = ?1 ORDER BY created_at DESC"
        ))?;
        let rows = stmt.query_map(params![value], row_to_payment)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

pub(crate) fn row_to_payment(row: &Row<'_>) -> rusqlite::Result<Payment> {
    let id: String = row.get("id")?;
    Ok(Payment {
        id: id
            .parse::<PaymentId>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?,
        program: row.get("program")?,
        payer_name: row.get("payer_name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        transaction_id: row.get("transaction_id")?,
        amount: row.get("amount")?,
        currency: row.get("currency")?,
        method: row.get("method")?,
        status: row.get("status")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

// ============================================================================
// Tests
// ============================================================================
