//! Payment types for prime-ledger.
//!
//! A payment row records one completed transaction reported by the payment
//! provider. Rows are append-only: nothing in the data layer mutates a payment
//! after insert, so `updated_at` keeps its insert-time value for the life of
//! the row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::PaymentId;

/// Default currency for payment amounts.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Default status for a recorded payment.
///
/// Status is free text; the application only writes rows for transactions the
/// provider already settled, hence the default.
pub const DEFAULT_STATUS: &str = "completed";

/// One completed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Surrogate key.
    pub id: PaymentId,

    /// Program the payer purchased (catalog name, e.g. `"PrimeStart"`).
    pub program: String,

    /// Payer's full name.
    pub payer_name: String,

    /// Payer's email address.
    pub email: String,

    /// Payer's phone number.
    pub phone: String,

    /// Transaction identifier issued by the payment provider.
    /// Globally unique; the schema rejects duplicates.
    pub transaction_id: String,

    /// Amount in the currency's smallest unit.
    /// The schema does not constrain the sign.
    pub amount: i64,

    /// ISO currency code, `"INR"` unless the caller says otherwise.
    pub currency: String,

    /// Payment method reported by the provider (e.g. `"upi"`, `"card"`).
    pub method: Option<String>,

    /// Free-text status, `"completed"` unless the caller says otherwise.
    pub status: String,

    /// When the row was recorded.
    pub created_at: DateTime<Utc>,

    /// Equal to `created_at`; nothing refreshes it after insert.
    pub updated_at: DateTime<Utc>,
}

/// Payload for recording a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPayment {
    /// Program the payer purchased.
    pub program: String,

    /// Payer's full name.
    pub payer_name: String,

    /// Payer's email address.
    pub email: String,

    /// Payer's phone number.
    pub phone: String,

    /// Transaction identifier issued by the payment provider.
    pub transaction_id: String,

    /// Amount in the currency's smallest unit.
    pub amount: i64,

    /// ISO currency code.
    pub currency: String,

    /// Payment method, if the provider reported one.
    pub method: Option<String>,

    /// Free-text status.
    pub status: String,
}

impl NewPayment {
    /// Create a payload with the default currency and status.
    #[must_use]
    pub fn new(
        program: impl Into<String>,
        payer_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        transaction_id: impl Into<String>,
        amount: i64,
    ) -> Self {
        Self {
            program: program.into(),
            payer_name: payer_name.into(),
            email: email.into(),
            phone: phone.into(),
            transaction_id: transaction_id.into(),
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            method: None,
            status: DEFAULT_STATUS.to_string(),
        }
    }

    /// Set the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the payment method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Turn the payload into a full row with the given key and timestamp.
    ///
    /// Both timestamps start out equal; no later write path touches either.
    #[must_use]
    pub fn into_payment(self, id: PaymentId, recorded_at: DateTime<Utc>) -> Payment {
        Payment {
            id,
            program: self.program,
            payer_name: self.payer_name,
            email: self.email,
            phone: self.phone,
            transaction_id: self.transaction_id,
            amount: self.amount,
            currency: self.currency,
            method: self.method,
            status: self.status,
            created_at: recorded_at,
            updated_at: recorded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewPayment {
        NewPayment::new(
            "PrimeStart",
            "Asha Rao",
            "asha@example.com",
            "+91 90000 12345",
            "pay_0001",
            5000,
        )
    }

    #[test]
    fn new_payment_defaults() {
        let new = sample();
        assert_eq!(new.currency, "INR");
        assert_eq!(new.status, "completed");
        assert!(new.method.is_none());
    }

    #[test]
    fn builders_override_defaults() {
        let new = sample()
            .with_currency("USD")
            .with_method("upi")
            .with_status("refund_pending");
        assert_eq!(new.currency, "USD");
        assert_eq!(new.method.as_deref(), Some("upi"));
        assert_eq!(new.status, "refund_pending");
    }

    #[test]
    fn into_payment_keeps_timestamps_equal() {
        let id = PaymentId::generate();
        let at = Utc::now();
        let payment = sample().into_payment(id, at);
        assert_eq!(payment.id, id);
        assert_eq!(payment.created_at, at);
        assert_eq!(payment.updated_at, payment.created_at);
        assert_eq!(payment.amount, 5000);
    }

    #[test]
    fn negative_amount_is_representable() {
        // The schema deliberately does not constrain the sign.
        let new = NewPayment::new("PrimeStart", "A", "a@b.c", "1", "pay_neg", -250);
        assert_eq!(new.amount, -250);
    }
}
