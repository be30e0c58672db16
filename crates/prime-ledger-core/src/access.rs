//! Access vocabulary for prime-ledger.
//!
//! The schema definition installs row-security state alongside the tables,
//! and every data operation is evaluated against it. These types name the two
//! sides of that evaluation: who is asking (`Caller`) and what they are
//! asking to do (`TableAction`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a caller acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// No credential presented. Subject to row security wherever it is
    /// enforced; this is the public site and anyone else on the network.
    Anonymous,

    /// The owning application's trusted backend. Bypasses row security the
    /// way a privileged database role does.
    Service,
}

/// The caller identity every data operation is evaluated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Caller {
    role: Role,
}

impl Caller {
    /// A caller with no credential.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            role: Role::Anonymous,
        }
    }

    /// The trusted backend caller.
    #[must_use]
    pub const fn service() -> Self {
        Self {
            role: Role::Service,
        }
    }

    /// The caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Whether this caller bypasses row security.
    #[must_use]
    pub const fn bypasses_row_security(&self) -> bool {
        matches!(self.role, Role::Service)
    }
}

/// A table operation that row-security policies govern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableAction {
    /// Inserting rows.
    Insert,

    /// Reading rows.
    Select,
}

impl TableAction {
    /// The action name as stored in the policy catalog.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Select => "select",
        }
    }
}

impl fmt::Display for TableAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
