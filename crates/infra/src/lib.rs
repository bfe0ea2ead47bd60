//! Infrastructure layer: storage seams, background reconciliation, seeding.

pub mod reconcile;
pub mod seed;
pub mod store;

pub use reconcile::{
    ReconcileError, ReconcilerConfig, ReconcilerHandle, ReconcilerStats, StockReconciler,
};
pub use seed::{SeedError, apply_stock_seed, load_stock_seed};
pub use store::{InMemoryOrderStore, InMemoryStockStore, OrderStore, StockStore, StoreError};
