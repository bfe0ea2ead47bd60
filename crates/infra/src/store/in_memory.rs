use std::collections::HashMap;
use std::sync::RwLock;

use bookstore_core::StockRecordId;
use bookstore_inventory::StockRecord;
use bookstore_orders::Order;

use super::{OrderStore, StockStore, StoreError};

/// In-memory stock store.
///
/// Intended for tests/dev. Not optimized for performance: `find_by_name`
/// scans all records, which is fine at seed-data scale.
#[derive(Debug, Default)]
pub struct InMemoryStockStore {
    records: RwLock<HashMap<StockRecordId, StockRecord>>,
}

impl InMemoryStockStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl StockStore for InMemoryStockStore {
    async fn find_by_id(&self, id: StockRecordId) -> Result<Option<StockRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<StockRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.values().find(|r| r.name() == name).cloned())
    }

    async fn save(&self, record: StockRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        records.insert(record.id_typed(), record);
        Ok(())
    }
}

/// In-memory order store. Preserves insertion order.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(|_| StoreError::LockPoisoned)?;
        orders.push(order);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(orders.clone())
    }
}
