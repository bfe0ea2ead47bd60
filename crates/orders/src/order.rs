use serde::{Deserialize, Serialize};

use bookstore_catalog::Book;
use bookstore_core::{Entity, OrderId};

/// Incoming order: a sequence of books and one scalar quantity applied
/// uniformly to every book in the request. The quantity is deliberately not a
/// per-line amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub books: Vec<Book>,
    pub quantity: i64,
}

/// A persisted order.
///
/// Owns its book list: the books are copies taken from the request, never
/// shared with stock records, and deleting an order deletes them with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    books: Vec<Book>,
    quantity: i64,
}

impl Order {
    /// Materialize an accepted request: generate a fresh id, copy the book
    /// list and the scalar quantity.
    pub fn from_request(request: &OrderRequest) -> Self {
        Self {
            id: OrderId::new(),
            books: request.books.clone(),
            quantity: request.quantity,
        }
    }

    /// Rehydrate a persisted order from storage.
    pub fn from_parts(id: OrderId, books: Vec<Book>, quantity: i64) -> Self {
        Self {
            id,
            books,
            quantity,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
