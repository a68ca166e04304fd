//! Receipt validation, points scoring, and the identifier-keyed score store
//! backing the receipt processor HTTP service.

pub mod config;
pub mod error;
pub mod receipts;
pub mod telemetry;
