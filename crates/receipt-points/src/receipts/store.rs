use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use super::domain::{ReceiptId, ScoreRecord};

/// Storage abstraction so the service can be exercised against test doubles.
///
/// Implementations mint the identifier themselves; callers only ever hand
/// over the points produced by the scorer.
pub trait ScoreStore: Send + Sync {
    fn insert(&self, points: u64) -> Result<ScoreRecord, StoreError>;
    fn lookup(&self, id: &str) -> Result<Option<u64>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("score store unavailable: {0}")]
    Unavailable(String),
}

/// Process-lifetime score map guarded by a read/write lock.
#[derive(Debug, Default, Clone)]
pub struct InMemoryScoreStore {
    scores: Arc<RwLock<HashMap<ReceiptId, u64>>>,
}

impl InMemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<ReceiptId, u64>>, StoreError> {
        self.scores
            .read()
            .map_err(|_| StoreError::Unavailable("score store lock poisoned".to_string()))
    }
}

impl ScoreStore for InMemoryScoreStore {
    fn insert(&self, points: u64) -> Result<ScoreRecord, StoreError> {
        let mut guard = self
            .scores
            .write()
            .map_err(|_| StoreError::Unavailable("score store lock poisoned".to_string()))?;

        let mut id = ReceiptId::mint();
        while guard.contains_key(&id) {
            id = ReceiptId::mint();
        }
        guard.insert(id.clone(), points);

        Ok(ScoreRecord { id, points })
    }

    fn lookup(&self, id: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.read()?.get(id).copied())
    }
}
