//! SQLite-backed store for the prime-ledger payment-tracking data layer.
//!
//! The store owns three responsibilities:
//!
//! - **Definition**: [`Store::apply_definition`] provisions tables,
//!   indexes, row-security registrations, access policies, and the seed
//!   program catalog. Every step is idempotent, so it runs on each
//!   startup.
//! - **Row security**: operations take a [`Caller`](prime_ledger_core::Caller)
//!   and are checked against the policy catalog before touching data.
//!   Anonymous callers get exactly what the installed policies grant; the
//!   service role bypasses the checks.
//! - **Typed operations**: inserts and queries for payments, contact
//!   requests, programs, and site metrics, with engine constraint
//!   failures mapped to [`StoreError`] variants.
//!
//! ```no_run
//! use prime_ledger_core::{Caller, NewPayment};
//! use prime_ledger_store::Store;
//!
//! # fn main() -> prime_ledger_store::Result<()> {
//! let store = Store::open("ledger.db")?;
//! store.apply_definition()?;
//!
//! let payment = store.insert_payment(
//!     Caller::anonymous(),
//!     &NewPayment::new(
//!         "PrimeStart",
//!         "Asha Rao",
//!         "asha@example.com",
//!         "+91 98000 11111",
//!         "TXN-1001",
//!         5000,
//!     ),
//! )?;
//! println!("recorded {}", payment.id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod inspect;
pub mod reports;
pub mod schema;

mod contacts;
mod payments;
mod policy;
mod programs;
mod stats;

pub use error::{Result, StoreError};
pub use inspect::PolicyRow;
pub use reports::LedgerSummary;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use prime_ledger_core::{ProgramId, SEED_CATALOG};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

// ============================================================================
// Store
// ============================================================================

/// Handle to the ledger database.
///
/// The connection sits behind a mutex, so a `Store` can be shared across
/// threads; writers serialize on the lock and the engine's constraints
/// arbitrate conflicts.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens the database at `path`, creating the file if needed.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the file cannot be opened or
    /// the connection pragmas fail.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Opens a private in-memory database. Used by tests and demos;
    /// contents vanish when the store is dropped.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if the connection pragmas fail.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Locks the underlying connection for one operation.
    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("ledger store mutex poisoned")
    }

    // ========================================================================
    // Definition
    // ========================================================================

    /// Applies the full schema definition: tables, indexes, row-security
    /// registrations, access policies, and the seed program catalog.
    ///
    /// Safe to run on every startup. Each step skips anything already
    /// present, and the returned [`ApplyOutcome`] counts only what this
    /// call actually created.
    ///
    /// # Errors
    /// Returns [`StoreError::Database`] if any definition statement fails.
    pub fn apply_definition(&self) -> Result<ApplyOutcome> {
        let conn = self.conn();
        let mut outcome = ApplyOutcome::default();

        for (name, ddl) in schema::TABLES {
            if !object_exists(&conn, "table", name)? {
                outcome.created_tables += 1;
                tracing::debug!(table = name, "creating table");
            }
            conn.execute_batch(ddl)?;
        }

        for (name, ddl) in schema::INDEXES {
            if !object_exists(&conn, "index", name)? {
                outcome.created_indexes += 1;
                tracing::debug!(index = name, "creating index");
            }
            conn.execute_batch(ddl)?;
        }

        for table in schema::ROW_SECURED_TABLES {
            conn.execute(schema::INSERT_ROW_SECURITY, params![table])?;
        }

        for policy in schema::POLICIES {
            let installed = conn.execute(
                schema::INSERT_ACCESS_POLICY,
                params![policy.table, policy.name, policy.action.as_str()],
            )?;
            if installed > 0 {
                tracing::debug!(policy = policy.name, table = policy.table, "installing policy");
            }
            outcome.installed_policies += installed;
        }

        for seed in SEED_CATALOG {
            let seeded = conn.execute(
                schema::INSERT_SEED_PROGRAM,
                params![
                    ProgramId::generate().to_string(),
                    seed.name,
                    seed.price,
                    seed.original_price,
                    seed.description,
                    seed.contact_phone,
                    seed.contact_whatsapp,
                    seed.features_json(),
                    Utc::now(),
                ],
            )?;
            if seeded > 0 {
                tracing::debug!(program = seed.name, "seeding program");
            }
            outcome.seeded_programs += seeded;
        }

        tracing::info!(
            tables = outcome.created_tables,
            indexes = outcome.created_indexes,
            policies = outcome.installed_policies,
            programs = outcome.seeded_programs,
            "ledger definition applied"
        );
        Ok(outcome)
    }
}

/// What one [`Store::apply_definition`] call created.
///
/// All four counts are zero when the definition was already in place.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApplyOutcome {
    /// Tables created by this call.
    pub created_tables: usize,
    /// Indexes created by this call.
    pub created_indexes: usize,
    /// Access policies installed by this call.
    pub installed_policies: usize,
    /// Seed programs inserted by this call.
    pub seeded_programs: usize,
}

impl ApplyOutcome {
    /// True when the call found the definition already applied and
    /// changed nothing.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.created_tables == 0
            && self.created_indexes == 0
            && self.installed_policies == 0
            && self.seeded_programs == 0
    }
}

fn object_exists(conn: &Connection, kind: &str, name: &str) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = ?1 AND name = ?2",
            params![kind, name],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

// ============================================================================
// Tests
// ============================================================================
