//! Core types for prime-ledger.
//!
//! This crate provides the foundational types used throughout the prime-ledger
//! data layer:
//!
//! - **Identifiers**: `PaymentId`, `ContactId`, `ProgramId`, `MetricId`
//! - **Payments**: `Payment`, `NewPayment`
//! - **Contact log**: `ContactRequest`, `NewContactRequest`
//! - **Program catalog**: `Program`, `ProgramSeed`, `SEED_CATALOG`
//! - **Site stats**: `MetricSample`, `NewMetricSample`
//! - **Access**: `Caller`, `Role`, `TableAction`
//!
//! # Amounts
//!
//! All monetary values (payment amounts, program prices) are stored as `i64`
//! in the currency's smallest unit to avoid floating point precision issues.
//! The default currency is INR, so a `5000` program price is ₹5,000 recorded
//! in whole rupees by the surrounding application.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod access;
pub mod contact;
pub mod ids;
pub mod payment;
pub mod program;
pub mod stats;

pub use access::{Caller, Role, TableAction};
pub use contact::{ContactRequest, NewContactRequest};
pub use ids::{ContactId, IdError, MetricId, PaymentId, ProgramId};
pub use payment::{NewPayment, Payment, DEFAULT_CURRENCY, DEFAULT_STATUS};
pub use program::{
    Program, ProgramSeed, PRIME_ADVANCE, PRIME_ELITE, PRIME_START, SEED_CATALOG,
};
pub use stats::{MetricSample, NewMetricSample};
