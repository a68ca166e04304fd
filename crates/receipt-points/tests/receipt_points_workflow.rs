use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use receipt_points::receipts::{receipts_router, InMemoryScoreStore, ReceiptPointsService};
use serde_json::{json, Value};
use tower::ServiceExt;

fn router() -> Router {
    let store = Arc::new(InMemoryScoreStore::new());
    receipts_router(Arc::new(ReceiptPointsService::new(store)))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("route executes");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    let payload = serde_json::from_slice(&body).expect("json payload");
    (status, payload)
}

async fn submit(router: &Router, receipt: &Value) -> (StatusCode, Value) {
    let request = Request::post("/receipts/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(receipt.to_string()))
        .expect("request builds");
    send(router, request).await
}

async fn lookup(router: &Router, id: &str) -> (StatusCode, Value) {
    let request = Request::get(format!("/receipts/{id}/points"))
        .body(Body::empty())
        .expect("request builds");
    send(router, request).await
}

async fn submit_for_points(router: &Router, receipt: &Value) -> u64 {
    let (status, payload) = submit(router, receipt).await;
    assert_eq!(status, StatusCode::OK, "submission accepted: {payload}");
    let id = payload["id"].as_str().expect("id returned").to_string();

    let (status, payload) = lookup(router, &id).await;
    assert_eq!(status, StatusCode::OK);
    payload["points"].as_u64().expect("points returned")
}

fn minimal(date: &str, time: &str, total: &str) -> Value {
    json!({
        "retailer": "A",
        "purchaseDate": date,
        "purchaseTime": time,
        "items": [{ "shortDescription": "B", "price": total }],
        "total": total
    })
}

fn target() -> Value {
    json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            { "shortDescription": "Mountain Dew 12PK", "price": "6.49" },
            { "shortDescription": "Emils Cheese Pizza", "price": "12.25" },
            { "shortDescription": "Knorr Creamy Chicken", "price": "1.26" },
            { "shortDescription": "Doritos Nacho Cheese", "price": "3.35" },
            { "shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00" }
        ],
        "total": "35.35"
    })
}

#[tokio::test]
async fn reference_receipts_score_as_documented() {
    let router = router();

    let corner_market = json!({
        "retailer": "M&M Corner Market",
        "purchaseDate": "2022-03-20",
        "purchaseTime": "14:33",
        "items": [
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" }
        ],
        "total": "9.00"
    });
    let simple = json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-02",
        "purchaseTime": "13:13",
        "total": "1.25",
        "items": [{ "shortDescription": "Pepsi - 12-oz", "price": "1.25" }]
    });
    let morning = json!({
        "retailer": "Walgreens",
        "purchaseDate": "2022-01-02",
        "purchaseTime": "08:13",
        "total": "2.65",
        "items": [
            { "shortDescription": "Pepsi - 12-oz", "price": "1.25" },
            { "shortDescription": "Dasani", "price": "1.40" }
        ]
    });

    assert_eq!(submit_for_points(&router, &target()).await, 28);
    assert_eq!(submit_for_points(&router, &corner_market).await, 109);
    assert_eq!(submit_for_points(&router, &simple).await, 31);
    assert_eq!(submit_for_points(&router, &morning).await, 15);
}

#[tokio::test]
async fn minimal_receipts_exercise_each_bonus() {
    let router = router();

    let cases = [
        (minimal("2025-01-14", "13:59", "1.25"), 26),
        (minimal("2025-01-14", "13:59", "1.00"), 76),
        (minimal("2025-01-14", "14:01", "1.01"), 11),
        (minimal("2025-01-14", "14:00", "1.01"), 1),
        (minimal("2025-01-15", "16:01", "1.01"), 7),
    ];

    for (receipt, expected) in cases {
        assert_eq!(
            submit_for_points(&router, &receipt).await,
            expected,
            "receipt {receipt}"
        );
    }
}

#[tokio::test]
async fn malformed_receipts_are_rejected() {
    let router = router();

    let mut cases = Vec::new();
    let mut bad_retailer = target();
    bad_retailer["retailer"] = json!("!!!@@@###");
    cases.push(bad_retailer);
    for total in ["35", "35.349"] {
        let mut bad_total = target();
        bad_total["total"] = json!(total);
        cases.push(bad_total);
    }
    let mut bad_price = target();
    bad_price["items"][0]["price"] = json!("6.4");
    cases.push(bad_price);
    let mut bad_date = target();
    bad_date["purchaseDate"] = json!("2025-1-7");
    cases.push(bad_date);
    let mut bad_time = target();
    bad_time["purchaseTime"] = json!("3 PM");
    cases.push(bad_time);
    let mut no_items = target();
    no_items["items"] = json!([]);
    cases.push(no_items);

    for receipt in cases {
        let (status, payload) = submit(&router, &receipt).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "receipt {receipt}");
        let description = payload["description"].as_str().expect("description");
        assert!(description.starts_with("The receipt is invalid."));
    }
}

#[tokio::test]
async fn unknown_identifier_is_not_found() {
    let router = router();

    let (status, payload) = lookup(&router, "7fb1377b-b223-49d9-a31a-5a02701dd310").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(payload, json!({ "description": "No receipt found for that ID." }));
}

#[tokio::test]
async fn duplicate_submissions_get_distinct_ids() {
    let router = router();

    let (_, first) = submit(&router, &target()).await;
    let (_, second) = submit(&router, &target()).await;
    let first = first["id"].as_str().expect("id").to_string();
    let second = second["id"].as_str().expect("id").to_string();

    assert_ne!(first, second);
    for id in [&first, &second, &first] {
        let (status, payload) = lookup(&router, id).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload, json!({ "points": 28 }));
    }
}
