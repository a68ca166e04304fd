use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use super::domain::ReceiptSubmission;
use super::service::{ReceiptPointsService, ReceiptServiceError};
use super::store::ScoreStore;

pub const UNBOUND_DESCRIPTION: &str = "The receipt is invalid. Doesn't bind";
pub const NOT_FOUND_DESCRIPTION: &str = "No receipt found for that ID.";

/// Router builder exposing the submit and lookup endpoints.
pub fn receipts_router<S>(service: Arc<ReceiptPointsService<S>>) -> Router
where
    S: ScoreStore + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<S>))
        .route("/receipts/:id/points", get(points_handler::<S>))
        .with_state(service)
}

pub(crate) async fn process_handler<S>(
    State(service): State<Arc<ReceiptPointsService<S>>>,
    payload: Result<Json<ReceiptSubmission>, JsonRejection>,
) -> Response
where
    S: ScoreStore + 'static,
{
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "receipt payload does not bind");
            return description_response(StatusCode::BAD_REQUEST, UNBOUND_DESCRIPTION);
        }
    };

    match service.process(&submission) {
        Ok(record) => (StatusCode::OK, Json(json!({ "id": record.id }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn points_handler<S>(
    State(service): State<Arc<ReceiptPointsService<S>>>,
    Path(id): Path<String>,
) -> Response
where
    S: ScoreStore + 'static,
{
    match service.points(&id) {
        Ok(points) => (StatusCode::OK, Json(json!({ "points": points }))).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ReceiptServiceError) -> Response {
    match err {
        ReceiptServiceError::Validation(err) => {
            description_response(StatusCode::BAD_REQUEST, &err.description())
        }
        ReceiptServiceError::NotFound => {
            description_response(StatusCode::NOT_FOUND, NOT_FOUND_DESCRIPTION)
        }
        ReceiptServiceError::Store(err) => {
            description_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

fn description_response(status: StatusCode, description: &str) -> Response {
    (status, Json(json!({ "description": description }))).into_response()
}
