//! Declarative schema for the ledger database.
//!
//! Everything here is data consumed by
//! [`Store::apply_definition`](crate::Store::apply_definition):
//!
//! - table DDL (`CREATE TABLE IF NOT EXISTS`)
//! - secondary indexes (`CREATE INDEX IF NOT EXISTS`)
//! - row-security registrations and access policies
//! - the seed insert for the program catalog
//!
//! Every statement is idempotent by construction, so applying the
//! definition to an already-provisioned database changes nothing.

use prime_ledger_core::TableAction;

// ============================================================================
// Table names
// ============================================================================

/// Table names.
pub mod table {
    /// Completed payment records.
    pub const PAYMENTS: &str = "payments";
    /// Callback requests from prospective customers.
    pub const CONTACT_REQUESTS: &str = "contact_requests";
    /// The program catalog.
    pub const PROGRAMS: &str = "programs";
    /// Daily site metrics.
    pub const SITE_STATS: &str = "site_stats";
    /// Registry of tables with row security enforced.
    pub const ROW_SECURITY: &str = "row_security";
    /// Access policies granted on row-secured tables.
    pub const ACCESS_POLICIES: &str = "access_policies";
}

// ============================================================================
// Tables
// ============================================================================

/// Payments table.
///
/// `updated_at` takes the same default as `created_at`; nothing refreshes
/// it after insert.
pub const CREATE_PAYMENTS: &str = r"
CREATE TABLE IF NOT EXISTS payments (
    id              TEXT PRIMARY KEY,
    program         TEXT NOT NULL,
    payer_name      TEXT NOT NULL,
    email           TEXT NOT NULL,
    phone           TEXT NOT NULL,
    transaction_id  TEXT NOT NULL UNIQUE,
    amount          INTEGER NOT NULL,
    currency        TEXT NOT NULL DEFAULT 'INR',
    method          TEXT,
    status          TEXT NOT NULL DEFAULT 'completed',
    created_at      TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at      TEXT NOT NULL DEFAULT (datetime('now'))
)";

/// Contact requests table.
pub const CREATE_CONTACT_REQUESTS: &str = r"
CREATE TABLE IF NOT EXISTS contact_requests (
    id              TEXT PRIMARY KEY,
    program         TEXT NOT NULL,
    contact_method  TEXT NOT NULL,
    requester_ip    TEXT,
    user_agent      TEXT,
    created_at      TEXT NOT NULL DEFAULT (datetime('now'))
)";

/// Program catalog table. `features` holds a JSON array of bullet points.
pub const CREATE_PROGRAMS: &str = r"
CREATE TABLE IF NOT EXISTS programs (
    id                TEXT PRIMARY KEY,
    name              TEXT NOT NULL UNIQUE,
    price             INTEGER,
    original_price    INTEGER,
    description       TEXT,
    contact_phone     TEXT,
    contact_whatsapp  TEXT,
    features          TEXT,
    created_at        TEXT NOT NULL DEFAULT (datetime('now'))
)";

/// Site metrics table.
pub const CREATE_SITE_STATS: &str = r"
CREATE TABLE IF NOT EXISTS site_stats (
    id          TEXT PRIMARY KEY,
    metric      TEXT NOT NULL,
    value       REAL NOT NULL,
    day         TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
)";

/// Row-security registry. A table listed here has its access gated by
/// [`ACCESS_POLICIES`](table::ACCESS_POLICIES); a table absent from it is
/// unrestricted.
pub const CREATE_ROW_SECURITY: &str = r"
CREATE TABLE IF NOT EXISTS row_security (
    table_name  TEXT PRIMARY KEY,
    enforced    INTEGER NOT NULL DEFAULT 1
)";

/// Access policy catalog. Each row grants one action on one table to the
/// public role.
pub const CREATE_ACCESS_POLICIES: &str = r"
CREATE TABLE IF NOT EXISTS access_policies (
    table_name   TEXT NOT NULL,
    policy_name  TEXT NOT NULL,
    action       TEXT NOT NULL,
    role         TEXT NOT NULL DEFAULT 'public',
    UNIQUE (table_name, policy_name)
)";

/// All tables in creation order, paired with their names for
/// existence checks.
pub const TABLES: &[(&str, &str)] = &[
    (table::PAYMENTS, CREATE_PAYMENTS),
    (table::CONTACT_REQUESTS, CREATE_CONTACT_REQUESTS),
    (table::PROGRAMS, CREATE_PROGRAMS),
    (table::SITE_STATS, CREATE_SITE_STATS),
    (table::ROW_SECURITY, CREATE_ROW_SECURITY),
    (table::ACCESS_POLICIES, CREATE_ACCESS_POLICIES),
];

// ============================================================================
// Indexes
// ============================================================================

/// All secondary indexes, paired with their names for existence checks.
///
/// Payments are looked up by payer identity and filtered by program or
/// status; contact requests are listed per program and per channel, newest
/// first. Each of those access paths gets a covering index.
pub const INDEXES: &[(&str, &str)] = &[
    (
        "idx_payments_email",
        "CREATE INDEX IF NOT EXISTS idx_payments_email ON payments (email)",
    ),
    (
        "idx_payments_phone",
        "CREATE INDEX IF NOT EXISTS idx_payments_phone ON payments (phone)",
    ),
    (
        "idx_payments_transaction_id",
        "CREATE INDEX IF NOT EXISTS idx_payments_transaction_id ON payments (transaction_id)",
    ),
    (
        "idx_payments_created_at",
        "CREATE INDEX IF NOT EXISTS idx_payments_created_at ON payments (created_at)",
    ),
    (
        "idx_payments_program",
        "CREATE INDEX IF NOT EXISTS idx_payments_program ON payments (program)",
    ),
    (
        "idx_payments_status",
        "CREATE INDEX IF NOT EXISTS idx_payments_status ON payments (status)",
    ),
    (
        "idx_contact_requests_program",
        "CREATE INDEX IF NOT EXISTS idx_contact_requests_program ON contact_requests (program)",
    ),
    (
        "idx_contact_requests_created_at",
        "CREATE INDEX IF NOT EXISTS idx_contact_requests_created_at ON contact_requests (created_at)",
    ),
    (
        "idx_contact_requests_contact_method",
        "CREATE INDEX IF NOT EXISTS idx_contact_requests_contact_method ON contact_requests (contact_method)",
    ),
];

// ============================================================================
// Row security
// ============================================================================

/// Tables registered for row security. Anything not listed here is
/// readable and writable by any caller.
pub const ROW_SECURED_TABLES: &[&str] = &[table::PAYMENTS, table::CONTACT_REQUESTS];

/// One access policy: `action` on `table` is open to the public role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyDef {
    /// Table the policy applies to.
    pub table: &'static str,
    /// Unique policy name, namespaced by table.
    pub name: &'static str,
    /// Action the policy permits.
    pub action: TableAction,
}

/// The full policy catalog.
///
/// Payments accept public inserts and public reads; contact requests
/// accept public inserts only, so the backlog of callback requests is
/// not exposed.
pub const POLICIES: &[PolicyDef] = &[
    PolicyDef {
        table: table::PAYMENTS,
        name: "payments_public_insert",
        action: TableAction::Insert,
    },
    PolicyDef {
        table: table::PAYMENTS,
        name: "payments_public_select",
        action: TableAction::Select,
    },
    PolicyDef {
        table: table::CONTACT_REQUESTS,
        name: "contact_requests_public_insert",
        action: TableAction::Insert,
    },
];

// ============================================================================
// Catalog inserts
// ============================================================================

/// Registers a table for row security; re-registration is a no-op.
pub const INSERT_ROW_SECURITY: &str = r"
INSERT INTO row_security (table_name) VALUES (?1)
ON CONFLICT (table_name) DO NOTHING";

/// Installs one access policy; reinstalling is a no-op.
pub const INSERT_ACCESS_POLICY: &str = r"
INSERT INTO access_policies (table_name, policy_name, action) VALUES (?1, ?2, ?3)
ON CONFLICT (table_name, policy_name) DO NOTHING";

/// Inserts one seed program, skipping any name already in the catalog.
pub const INSERT_SEED_PROGRAM: &str = r"
INSERT INTO programs (id, name, price, original_price, description,
                      contact_phone, contact_whatsapp, features, created_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
ON CONFLICT (name) DO NOTHING";

// ============================================================================
// Tests
// ============================================================================
