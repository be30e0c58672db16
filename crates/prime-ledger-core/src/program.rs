//! Program catalog types for prime-ledger.
//!
//! Programs are static reference data: the three offerings shown on the
//! public site, seeded once when the schema definition is applied and skipped
//! on every later apply (conflict-skip on the unique name).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ProgramId;

// ============================================================================
// Catalog names
// ============================================================================

/// Entry-level program name.
pub const PRIME_START: &str = "PrimeStart";

/// Intermediate program name.
pub const PRIME_ADVANCE: &str = "PrimeAdvance";

/// Flagship program name.
pub const PRIME_ELITE: &str = "PrimeElite";

/// Support phone number shown on every program card.
pub const SUPPORT_PHONE: &str = "+91 90000 00001";

/// Support WhatsApp number shown on every program card.
pub const SUPPORT_WHATSAPP: &str = "+91 90000 00002";

/// One program catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Surrogate key.
    pub id: ProgramId,

    /// Unique catalog name.
    pub name: String,

    /// Current price in the currency's smallest unit, if listed.
    pub price: Option<i64>,

    /// Struck-through original price, if listed.
    pub original_price: Option<i64>,

    /// Short description shown on the program card.
    pub description: Option<String>,

    /// Support phone number for this program.
    pub contact_phone: Option<String>,

    /// Support WhatsApp number for this program.
    pub contact_whatsapp: Option<String>,

    /// Feature list as a JSON blob, shape owned by the front end.
    pub features: serde_json::Value,

    /// When the row was seeded.
    pub created_at: DateTime<Utc>,
}

/// A static seed row for the program catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramSeed {
    /// Unique catalog name.
    pub name: &'static str,

    /// Current price in the currency's smallest unit.
    pub price: i64,

    /// Struck-through original price.
    pub original_price: i64,

    /// Short description shown on the program card.
    pub description: &'static str,

    /// Support phone number.
    pub contact_phone: &'static str,

    /// Support WhatsApp number.
    pub contact_whatsapp: &'static str,

    /// Feature list.
    pub features: &'static [&'static str],
}

impl ProgramSeed {
    /// Feature list as the JSON array the schema stores.
    #[must_use]
    pub fn features_json(&self) -> serde_json::Value {
        serde_json::json!(self.features)
    }
}

/// The three fixed rows seeded into the program catalog.
pub const SEED_CATALOG: &[ProgramSeed] = &[
    ProgramSeed {
        name: PRIME_START,
        price: 5000,
        original_price: 9999,
        description: "Entry program covering platform basics with guided onboarding.",
        contact_phone: SUPPORT_PHONE,
        contact_whatsapp: SUPPORT_WHATSAPP,
        features: &[
            "Guided onboarding",
            "Community access",
            "Weekly live Q&A",
        ],
    },
    ProgramSeed {
        name: PRIME_ADVANCE,
        price: 7500,
        original_price: 14999,
        description: "Intermediate program with strategy deep-dives and practice drills.",
        contact_phone: SUPPORT_PHONE,
        contact_whatsapp: SUPPORT_WHATSAPP,
        features: &[
            "Everything in PrimeStart",
            "Strategy deep-dives",
            "Practice drills",
            "Priority chat support",
        ],
    },
    ProgramSeed {
        name: PRIME_ELITE,
        price: 12500,
        original_price: 24999,
        description: "Flagship program with one-on-one mentorship and lifetime updates.",
        contact_phone: SUPPORT_PHONE,
        contact_whatsapp: SUPPORT_WHATSAPP,
        features: &[
            "Everything in PrimeAdvance",
            "One-on-one mentorship",
            "Lifetime updates",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_catalog_has_three_fixed_names() {
        let names: Vec<_> = SEED_CATALOG.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["PrimeStart", "PrimeAdvance", "PrimeElite"]);
    }

    #[test]
    fn seed_prices_are_discounted() {
        for seed in SEED_CATALOG {
            assert!(seed.price < seed.original_price, "{} not discounted", seed.name);
        }
    }

    #[test]
    fn features_json_is_a_string_array() {
        let value = SEED_CATALOG[0].features_json();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 3);
        assert!(array.iter().all(serde_json::Value::is_string));
    }
}
