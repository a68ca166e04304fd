use std::sync::Arc;

use tracing::{debug, info, warn};

use super::domain::{ReceiptSubmission, ScoreRecord};
use super::scoring::{ScoreBreakdown, ScoreEngine};
use super::store::{ScoreStore, StoreError};
use super::validation::{ReceiptValidator, ValidationError};

/// Service composing the validator, scorer, and score store.
pub struct ReceiptPointsService<S> {
    validator: Arc<ReceiptValidator>,
    engine: ScoreEngine,
    store: Arc<S>,
}

impl<S> ReceiptPointsService<S>
where
    S: ScoreStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            validator: Arc::new(ReceiptValidator::new()),
            engine: ScoreEngine::new(),
            store,
        }
    }

    /// Validate and score without touching the store.
    pub fn score(
        &self,
        submission: &ReceiptSubmission,
    ) -> Result<ScoreBreakdown, ReceiptServiceError> {
        let receipt = self.validator.validate(submission)?;
        Ok(self.engine.score(&receipt))
    }

    /// Validate, score, and store a receipt, returning the minted record.
    pub fn process(
        &self,
        submission: &ReceiptSubmission,
    ) -> Result<ScoreRecord, ReceiptServiceError> {
        let breakdown = match self.score(submission) {
            Ok(breakdown) => breakdown,
            Err(err) => {
                warn!(reason = %err, "receipt rejected");
                return Err(err);
            }
        };

        let record = self.store.insert(breakdown.total_points)?;
        info!(
            id = %record.id,
            points = record.points,
            rules = breakdown.components.len(),
            "receipt processed"
        );
        Ok(record)
    }

    /// Fetch the points stored for an identifier.
    pub fn points(&self, id: &str) -> Result<u64, ReceiptServiceError> {
        match self.store.lookup(id)? {
            Some(points) => Ok(points),
            None => {
                debug!(id, "no receipt stored for id");
                Err(ReceiptServiceError::NotFound)
            }
        }
    }
}

/// Error raised by the receipt service.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("No receipt found for that ID.")]
    NotFound,
}
