use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use bookstore_infra::StoreError;
use bookstore_orders::OrderError;

/// Error body shape used for client errors:
/// `{ "message": ..., "status": <code>, "details": "" }`.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(json!({
            "message": message.into(),
            "status": status.as_u16(),
            "details": "",
        })),
    )
        .into_response()
}

/// A validation rejection from the order flow: always a 400 whose message is
/// the error's display text.
pub fn order_rejection(err: &OrderError) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, err.to_string())
}

pub fn store_error(err: &StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "store failure");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
}
