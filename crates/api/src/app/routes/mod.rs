use axum::Router;

pub mod orders;
pub mod stock;
pub mod system;

/// Router for all bookstore endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/orders", orders::router())
        .nest("/books_stock", stock::router())
}
