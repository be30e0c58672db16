//! Identifier types for prime-ledger.
//!
//! Every table uses a surrogate key: an auto-generated UUID with no business
//! meaning, minted in-process when the row is recorded. The external
//! `transaction_id` on payments is deliberately **not** one of these types —
//! it is an opaque string issued by the payment provider and only its
//! uniqueness is enforced, by the schema.
//!
//! # Macro-based ID Types
//!
//! The `uuid_id_type!` macro reduces boilerplate for UUID-based identifier
//! types, ensuring consistent implementation of serialization, parsing, and
//! display traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to define a UUID-based identifier type with standard trait implementations.
///
/// This macro generates a newtype wrapper around `uuid::Uuid` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - `Serialize`, `Deserialize` (as string)
/// - `FromStr`, `Display`, `Debug`
/// - `TryFrom<String>`, `Into<String>`
macro_rules! uuid_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Create an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a new random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Return the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = uuid::Uuid::parse_str(s).map_err(|_| IdError::InvalidUuid)?;
                Ok(Self(uuid))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0.to_string()
            }
        }
    };
}

uuid_id_type!(PaymentId, "Surrogate key for a payment row.");
uuid_id_type!(ContactId, "Surrogate key for a contact log row.");
uuid_id_type!(ProgramId, "Surrogate key for a program catalog row.");
uuid_id_type!(MetricId, "Surrogate key for a site stats row.");

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a valid UUID.
    #[error("invalid UUID format")]
    InvalidUuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_id_roundtrip() {
        let id = PaymentId::generate();
        let str_repr = id.to_string();
        let parsed = PaymentId::from_str(&str_repr).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn payment_id_serde_json() {
        let id = PaymentId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: PaymentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn contact_id_rejects_garbage() {
        assert_eq!(ContactId::from_str("not-a-uuid"), Err(IdError::InvalidUuid));
    }

    #[test]
    fn program_id_distinct_per_generate() {
        assert_ne!(ProgramId::generate(), ProgramId::generate());
    }

    #[test]
    fn metric_id_debug_names_the_type() {
        let id = MetricId::generate();
        assert!(format!("{id:?}").starts_with("MetricId("));
    }
}
