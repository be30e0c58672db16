//! Contact log types for prime-ledger.
//!
//! Each row records one contact attempt from the public site (a "call me" or
//! WhatsApp tap). The log is append-only and carries no uniqueness
//! constraint: the same visitor tapping twice produces two rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ContactId;

/// One recorded contact attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    /// Surrogate key.
    pub id: ContactId,

    /// Program the visitor was looking at.
    pub program: String,

    /// How the visitor reached out (e.g. `"whatsapp"`, `"phone"`).
    pub contact_method: String,

    /// Requester IP as reported by the front end, if any.
    pub requester_ip: Option<String>,

    /// Requester user agent, if any.
    pub user_agent: Option<String>,

    /// When the row was recorded.
    pub created_at: DateTime<Utc>,
}

/// Payload for recording a contact attempt.
///
/// `program` and `contact_method` are required by the schema. They are kept
/// optional here because the row is stored exactly as the caller supplied it;
/// a missing value is rejected by the engine's NOT NULL constraint, not by
/// this layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactRequest {
    /// Program the visitor was looking at.
    pub program: Option<String>,

    /// How the visitor reached out.
    pub contact_method: Option<String>,

    /// Requester IP, if the front end captured one.
    pub requester_ip: Option<String>,

    /// Requester user agent, if the front end captured one.
    pub user_agent: Option<String>,
}

impl NewContactRequest {
    /// Create a payload with both required fields present.
    #[must_use]
    pub fn new(program: impl Into<String>, contact_method: impl Into<String>) -> Self {
        Self {
            program: Some(program.into()),
            contact_method: Some(contact_method.into()),
            requester_ip: None,
            user_agent: None,
        }
    }

    /// Set the requester IP.
    #[must_use]
    pub fn with_requester_ip(mut self, ip: impl Into<String>) -> Self {
        self.requester_ip = Some(ip.into());
        self
    }

    /// Set the requester user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_required_fields() {
        let new = NewContactRequest::new("PrimeElite", "whatsapp");
        assert_eq!(new.program.as_deref(), Some("PrimeElite"));
        assert_eq!(new.contact_method.as_deref(), Some("whatsapp"));
        assert!(new.requester_ip.is_none());
        assert!(new.user_agent.is_none());
    }

    #[test]
    fn missing_json_fields_deserialize_to_none() {
        // A front-end beacon that only sends the method still deserializes;
        // the schema decides whether the row is acceptable.
        let new: NewContactRequest =
            serde_json::from_str(r#"{"contact_method":"phone"}"#).unwrap();
        assert!(new.program.is_none());
        assert_eq!(new.contact_method.as_deref(), Some("phone"));
    }

    #[test]
    fn requester_builders() {
        let new = NewContactRequest::new("PrimeStart", "phone")
            .with_requester_ip("203.0.113.9")
            .with_user_agent("Mozilla/5.0");
        assert_eq!(new.requester_ip.as_deref(), Some("203.0.113.9"));
        assert_eq!(new.user_agent.as_deref(), Some("Mozilla/5.0"));
    }
}
