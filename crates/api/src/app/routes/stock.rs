use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use bookstore_core::StockRecordId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/:book_id", get(get_stock))
}

pub async fn get_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(book_id): Path<String>,
) -> axum::response::Response {
    // Stock ids are opaque strings to callers; one that does not parse cannot
    // name an existing record, so it gets the same not-found as an unknown id.
    let id: StockRecordId = match book_id.parse() {
        Ok(v) => v,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    };

    match services.get_stock(id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(dto::stock_to_json(&record))).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => errors::store_error(&e),
    }
}
