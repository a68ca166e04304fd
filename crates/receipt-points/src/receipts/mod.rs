//! Receipt intake: validation, points scoring, and the score store behind
//! the `/receipts` endpoints.

pub mod domain;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Amount, ItemSubmission, ReceiptId, ReceiptSubmission, ScoreRecord, ValidatedItem,
    ValidatedReceipt,
};
pub use router::receipts_router;
pub use scoring::{ScoreBreakdown, ScoreComponent, ScoreEngine, ScoreRule};
pub use service::{ReceiptPointsService, ReceiptServiceError};
pub use store::{InMemoryScoreStore, ScoreStore, StoreError};
pub use validation::{ReceiptValidator, ValidationError};
