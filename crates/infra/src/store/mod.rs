//! Storage boundary for orders and stock.
//!
//! This module defines infrastructure-facing abstractions over the two record
//! sets (orders, stock) without making any storage assumptions. The sets are
//! independent: orders reference stock only through title-string matching at
//! the application layer, never through a foreign key.

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::{InMemoryOrderStore, InMemoryStockStore};
#[cfg(feature = "postgres")]
pub use postgres::{PostgresOrderStore, PostgresStockStore};

use std::sync::Arc;

use thiserror::Error;

use bookstore_core::StockRecordId;
use bookstore_inventory::StockRecord;
use bookstore_orders::Order;

/// Store operation error.
///
/// These are **infrastructure errors** (locks, backend IO) as opposed to
/// domain errors (validation, availability).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    LockPoisoned,

    #[error("backend failure: {0}")]
    Backend(String),
}

/// Lookup and update of quantity-on-hand records.
///
/// `find_by_name` is the validation/reconciliation path (title-keyed,
/// case-sensitive exact match); `find_by_id` serves only the read endpoint.
/// `save` upserts by record id.
#[async_trait::async_trait]
pub trait StockStore: Send + Sync {
    async fn find_by_id(&self, id: StockRecordId) -> Result<Option<StockRecord>, StoreError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<StockRecord>, StoreError>;

    async fn save(&self, record: StockRecord) -> Result<(), StoreError>;
}

/// Append and list of persisted orders.
///
/// `list` returns whatever order the backend provides natively; the in-memory
/// store preserves insertion order, and callers must not assume more.
#[async_trait::async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, order: Order) -> Result<(), StoreError>;

    async fn list(&self) -> Result<Vec<Order>, StoreError>;
}

#[async_trait::async_trait]
impl<S> StockStore for Arc<S>
where
    S: StockStore + ?Sized,
{
    async fn find_by_id(&self, id: StockRecordId) -> Result<Option<StockRecord>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<StockRecord>, StoreError> {
        (**self).find_by_name(name).await
    }

    async fn save(&self, record: StockRecord) -> Result<(), StoreError> {
        (**self).save(record).await
    }
}

#[async_trait::async_trait]
impl<S> OrderStore for Arc<S>
where
    S: OrderStore + ?Sized,
{
    async fn insert(&self, order: Order) -> Result<(), StoreError> {
        (**self).insert(order).await
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        (**self).list().await
    }
}
