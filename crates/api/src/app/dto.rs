use serde::Deserialize;

use bookstore_catalog::Book;
use bookstore_core::BookId;
use bookstore_inventory::StockRecord;
use bookstore_orders::{Order, OrderRequest};

// -------------------------
// Request DTOs
// -------------------------

/// One book line of an incoming order. The id is optional on the wire; a
/// missing one is generated, matching the stored shape.
#[derive(Debug, Deserialize)]
pub struct BookEntry {
    pub id: Option<BookId>,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub books: Vec<BookEntry>,
    pub quantity: i64,
}

impl CreateOrderRequest {
    pub fn into_domain(self) -> OrderRequest {
        OrderRequest {
            books: self
                .books
                .into_iter()
                .map(|entry| match entry.id {
                    Some(id) => Book::with_id(id, entry.title),
                    None => Book::new(entry.title),
                })
                .collect(),
            quantity: self.quantity,
        }
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn order_to_json(order: &Order) -> serde_json::Value {
    serde_json::json!({
        "id": order.id_typed().to_string(),
        "books": order.books().iter().map(|b| serde_json::json!({
            "id": b.id_typed().to_string(),
            "title": b.title(),
        })).collect::<Vec<_>>(),
        "quantity": order.quantity(),
    })
}

pub fn stock_to_json(record: &StockRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id_typed().to_string(),
        "name": record.name(),
        "quantity": record.quantity(),
    })
}
