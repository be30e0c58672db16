//! Aggregate reporting over the ledger.
//!
//! Every report runs through the same row-security gate as the row-level
//! operations. Payment aggregates are therefore open to anonymous
//! callers, while anything touching `contact_requests` needs the service
//! role.

use std::fmt;

use prime_ledger_core::{Caller, Payment, TableAction};
use rusqlite::params;
use serde::Serialize;

use crate::error::Result;
use crate::payments::{row_to_payment, PAYMENT_COLUMNS};
use crate::policy::check_access;
use crate::schema::table;
use crate::Store;

/// One operator-facing snapshot of the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    /// Recorded payments.
    pub payments: u64,
    /// Recorded contact requests.
    pub contacts: u64,
    /// Programs in the catalog.
    pub programs: u64,
    /// Sum of all payment amounts, in the smallest currency unit.
    pub total_revenue: i64,
}

impl fmt::Display for LedgerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} payments totalling {} | {} contact requests | {} programs",
            self.payments, self.total_revenue, self.contacts, self.programs
        )
    }
}

impl Store {
    /// Sum of all payment amounts; zero when the table is empty.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` when the caller lacks a select grant on
    /// payments, otherwise `StoreError::Database`.
    pub fn total_revenue(&self, caller: Caller) -> Result<i64> {
        let conn = self.conn();
        check_access(&conn, caller, table::PAYMENTS, TableAction::Select)?;
        let total = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM payments",
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Revenue per program, highest earner first.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` when the caller lacks a select grant on
    /// payments, otherwise `StoreError::Database`.
    pub fn revenue_by_program(&self, caller: Caller) -> Result<Vec<(String, i64)>> {
        let conn = self.conn();
        check_access(&conn, caller, table::PAYMENTS, TableAction::Select)?;
        let mut stmt = conn.prepare(
            "SELECT program, SUM(amount) FROM payments \
             GROUP BY program ORDER BY SUM(amount) DESC",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Payment counts per status, most common first.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` when the caller lacks a select grant on
    /// payments, otherwise `StoreError::Database`.
    pub fn payment_count_by_status(&self, caller: Caller) -> Result<Vec<(String, u64)>> {
        let conn = self.conn();
        check_access(&conn, caller, table::PAYMENTS, TableAction::Select)?;
        let mut stmt = conn.prepare(
            "SELECT status, COUNT(*) FROM payments \
             GROUP BY status ORDER BY COUNT(*) DESC",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Contact request counts per channel, most common first.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` for anonymous callers, since no policy
    /// grants select on contact requests; otherwise `StoreError::Database`.
    pub fn contacts_by_method(&self, caller: Caller) -> Result<Vec<(String, u64)>> {
        let conn = self.conn();
        check_access(&conn, caller, table::CONTACT_REQUESTS, TableAction::Select)?;
        let mut stmt = conn.prepare(
            "SELECT contact_method, COUNT(*) FROM contact_requests \
             GROUP BY contact_method ORDER BY COUNT(*) DESC",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// The `limit` most recent payments.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` when the caller lacks a select grant on
    /// payments, otherwise `StoreError::Database`.
    pub fn recent_payments(&self, caller: Caller, limit: u32) -> Result<Vec<Payment>> {
        let conn = self.conn();
        check_access(&conn, caller, table::PAYMENTS, TableAction::Select)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments \
             ORDER BY created_at DESC, rowid DESC LIMIT ?1"
        ))?;
        let rows = stmt.query_map(params![limit], row_to_payment)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Builds a [`LedgerSummary`]. Reads both payments and contact
    /// requests, so in practice this is a service-role view.
    ///
    /// # Errors
    /// `StoreError::PolicyDenied` when any underlying read is denied,
    /// otherwise `StoreError::Database`.
    pub fn summary(&self, caller: Caller) -> Result<LedgerSummary> {
        let total_revenue = self.total_revenue(caller)?;
        let payments = self.count_payments(caller)?;
        let contacts = self.count_contacts(caller)?;
        let programs = {
            let conn = self.conn();
            check_access(&conn, caller, table::PROGRAMS, TableAction::Select)?;
            conn.query_row("SELECT COUNT(*) FROM programs", [], |row| row.get(0))?
        };
        Ok(LedgerSummary {
            payments,
            contacts,
            programs,
            total_revenue,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use prime_ledger_core::{NewContactRequest, NewPayment};

    use crate::StoreError;

    fn store() -> Store {
        let store = Store::open_in_memory().unwrap();
        store.apply_definition().unwrap();
        store
    }

    fn pay(transaction_id: &str, program: &str, amount: i64) -> NewPayment {
        NewPayment::new(
            program,
            "Asha Rao",
            "asha@example.com",
            "+91 98000 11111",
            transaction_id,
            amount,
        )
    }

    #[test]
    fn revenue_sums_recorded_amounts() {
        let store = store();
        assert_eq!(store.total_revenue(Caller::anonymous()).unwrap(), 0);

        store
            .insert_payment(Caller::anonymous(), &pay("TXN-1", "PrimeStart", 5000))
            .unwrap();
        store
            .insert_payment(Caller::anonymous(), &pay("TXN-2", "PrimeAdvance", 7500))
            .unwrap();

        assert_eq!(store.total_revenue(Caller::anonymous()).unwrap(), 12_500);
    }

    #[test]
    fn revenue_groups_by_program() {
        let store = store();
        store
            .insert_payment(Caller::anonymous(), &pay("TXN-1", "PrimeStart", 5000))
            .unwrap();
        store
            .insert_payment(Caller::anonymous(), &pay("TXN-2", "PrimeStart", 5000))
            .unwrap();
        store
            .insert_payment(Caller::anonymous(), &pay("TXN-3", "PrimeElite", 12_500))
            .unwrap();

        let by_program = store.revenue_by_program(Caller::anonymous()).unwrap();
        assert_eq!(
            by_program,
            vec![
                ("PrimeElite".to_string(), 12_500),
                ("PrimeStart".to_string(), 10_000),
            ]
        );
    }

    #[test]
    fn status_counts_cover_every_row() {
        let store = store();
        store
            .insert_payment(Caller::anonymous(), &pay("TXN-1", "PrimeStart", 5000))
            .unwrap();
        store
            .insert_payment(
                Caller::anonymous(),
                &pay("TXN-2", "PrimeStart", 5000).with_status("pending"),
            )
            .unwrap();
        store
            .insert_payment(Caller::anonymous(), &pay("TXN-3", "PrimeStart", 5000))
            .unwrap();

        let by_status = store.payment_count_by_status(Caller::anonymous()).unwrap();
        assert_eq!(
            by_status,
            vec![("completed".to_string(), 2), ("pending".to_string(), 1)]
        );
    }

    #[test]
    fn recent_payments_respects_the_limit() {
        let store = store();
        for i in 0..5 {
            store
                .insert_payment(Caller::anonymous(), &pay(&format!("TXN-{i}"), "PrimeStart", 100))
                .unwrap();
        }
        let recent = store.recent_payments(Caller::anonymous(), 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].transaction_id, "TXN-4");
        assert_eq!(recent[1].transaction_id, "TXN-3");
    }

    #[test]
    fn summary_needs_the_service_role() {
        let store = store();
        store
            .insert_payment(Caller::anonymous(), &pay("TXN-1", "PrimeStart", 5000))
            .unwrap();
        store
            .record_contact(
                Caller::anonymous(),
                &NewContactRequest::new("PrimeStart", "phone"),
            )
            .unwrap();

        let err = store.summary(Caller::anonymous()).unwrap_err();
        assert!(matches!(err, StoreError::PolicyDenied { .. }));

        let summary = store.summary(Caller::service()).unwrap();
        assert_eq!(summary.payments, 1);
        assert_eq!(summary.contacts, 1);
        assert_eq!(summary.programs, 3);
        assert_eq!(summary.total_revenue, 5000);
        assert_eq!(
            summary.to_string(),
            "1 payments totalling 5000 | 1 contact requests | 3 programs"
        );
    }

    #[test]
    fn contact_channel_counts_are_service_only() {
        let store = store();
        store
            .record_contact(
                Caller::anonymous(),
                &NewContactRequest::new("PrimeStart", "phone"),
            )
            .unwrap();
        store
            .record_contact(
                Caller::anonymous(),
                &NewContactRequest::new("PrimeStart", "phone"),
            )
            .unwrap();
        store
            .record_contact(
                Caller::anonymous(),
                &NewContactRequest::new("PrimeElite", "whatsapp"),
            )
            .unwrap();

        assert!(store.contacts_by_method(Caller::anonymous()).is_err());
        let by_method = store.contacts_by_method(Caller::service()).unwrap();
        assert_eq!(
            by_method,
            vec![("phone".to_string(), 2), ("whatsapp".to_string(), 1)]
        );
    }
}
