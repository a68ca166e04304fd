use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::receipts::domain::{ItemSubmission, ReceiptSubmission, ScoreRecord, ValidatedReceipt};
use crate::receipts::store::{InMemoryScoreStore, ScoreStore, StoreError};
use crate::receipts::validation::ReceiptValidator;
use crate::receipts::{receipts_router, ReceiptPointsService};

pub(super) fn item(short_description: &str, price: &str) -> ItemSubmission {
    ItemSubmission {
        short_description: Some(short_description.to_string()),
        price: Some(price.to_string()),
    }
}

pub(super) fn receipt(
    retailer: &str,
    purchase_date: &str,
    purchase_time: &str,
    items: Vec<ItemSubmission>,
    total: &str,
) -> ReceiptSubmission {
    ReceiptSubmission {
        retailer: Some(retailer.to_string()),
        purchase_date: Some(purchase_date.to_string()),
        purchase_time: Some(purchase_time.to_string()),
        items: Some(items),
        total: Some(total.to_string()),
    }
}

pub(super) fn target_receipt() -> ReceiptSubmission {
    receipt(
        "Target",
        "2022-01-01",
        "13:01",
        vec![
            item("Mountain Dew 12PK", "6.49"),
            item("Emils Cheese Pizza", "12.25"),
            item("Knorr Creamy Chicken", "1.26"),
            item("Doritos Nacho Cheese", "3.35"),
            item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ],
        "35.35",
    )
}

pub(super) fn corner_market_receipt() -> ReceiptSubmission {
    receipt(
        "M&M Corner Market",
        "2022-03-20",
        "14:33",
        vec![
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
            item("Gatorade", "2.25"),
        ],
        "9.00",
    )
}

/// Retailer "A" with a single item "B" priced at the total.
pub(super) fn minimal_receipt(purchase_date: &str, purchase_time: &str, total: &str) -> ReceiptSubmission {
    receipt(
        "A",
        purchase_date,
        purchase_time,
        vec![item("B", total)],
        total,
    )
}

pub(super) fn validated(submission: &ReceiptSubmission) -> ValidatedReceipt {
    ReceiptValidator::new()
        .validate(submission)
        .expect("receipt validates")
}

pub(super) fn build_service() -> (ReceiptPointsService<InMemoryScoreStore>, InMemoryScoreStore) {
    let store = InMemoryScoreStore::new();
    let service = ReceiptPointsService::new(Arc::new(store.clone()));
    (service, store)
}

pub(super) fn router_with_service(
    service: ReceiptPointsService<InMemoryScoreStore>,
) -> axum::Router {
    receipts_router(Arc::new(service))
}

pub(super) struct UnavailableStore;

impl ScoreStore for UnavailableStore {
    fn insert(&self, _points: u64) -> Result<ScoreRecord, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn lookup(&self, _id: &str) -> Result<Option<u64>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
