//! Subfolio Core - Billing and renewal calculations for subscriptions.
//!
//! This crate contains the calculation engine for Subfolio: currency
//! conversion with per-currency rounding, prorated monthly/yearly spend,
//! due-date scheduling and portfolio summaries. It is storage-agnostic
//! and defines the store trait that persistence layers implement.

pub mod billing;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod renewal;
pub mod subscriptions;
pub mod summary;

// Re-export common types from the subscription and summary modules
pub use subscriptions::*;
pub use summary::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
