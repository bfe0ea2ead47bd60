use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use crate::app::services::{AppServices, PlacementError};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(create_order).get(list_orders))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateOrderRequest>,
) -> axum::response::Response {
    match services.place_order(body.into_domain()).await {
        // Body is the bare order id string; stock may not have moved yet.
        Ok(order_id) => (StatusCode::OK, order_id.to_string()).into_response(),
        Err(PlacementError::Rejected(e)) => errors::order_rejection(&e),
        Err(PlacementError::Store(e)) => errors::store_error(&e),
    }
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_orders().await {
        Ok(orders) => {
            let body: Vec<serde_json::Value> = orders.iter().map(dto::order_to_json).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::store_error(&e),
    }
}
