//! Application services: store wiring and the order acceptance flow.

use std::sync::Arc;

use thiserror::Error;

use bookstore_core::{OrderId, StockRecordId};
use bookstore_infra::{
    InMemoryOrderStore, InMemoryStockStore, OrderStore, ReconcilerConfig, ReconcilerHandle,
    ReconcilerStats, StockReconciler, StockStore, StoreError, apply_stock_seed, load_stock_seed,
};
use bookstore_inventory::StockRecord;
use bookstore_orders::{Order, OrderError, OrderRequest, check_availability};

#[cfg(feature = "postgres")]
use anyhow::Context;
#[cfg(feature = "postgres")]
use bookstore_infra::store::{PostgresOrderStore, PostgresStockStore};

/// Why `place_order` did not produce an order.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// Validation rejected the request. Maps to a client error.
    #[error(transparent)]
    Rejected(#[from] OrderError),

    /// A store call failed. Maps to a server error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Shared application state handed to every request handler.
pub struct AppServices {
    stock_store: Arc<dyn StockStore>,
    order_store: Arc<dyn OrderStore>,
    reconciler: ReconcilerHandle,
}

impl AppServices {
    /// Wire services over the given stores and spawn the reconciler.
    pub fn new(stock_store: Arc<dyn StockStore>, order_store: Arc<dyn OrderStore>) -> Self {
        let reconciler = StockReconciler::spawn(stock_store.clone(), ReconcilerConfig::default());
        Self {
            stock_store,
            order_store,
            reconciler,
        }
    }

    /// Accept an order.
    ///
    /// Every book is validated in request order against current stock; the
    /// first failure aborts with nothing persisted. On success the order is
    /// persisted, the stock decrement is queued without being awaited, and
    /// the fresh order id is returned. Callers must not assume stock has
    /// moved by the time they see the id.
    pub async fn place_order(&self, request: OrderRequest) -> Result<OrderId, PlacementError> {
        for book in &request.books {
            let stock = self.stock_store.find_by_name(book.title()).await?;
            check_availability(stock.as_ref(), book.title(), request.quantity)?;
        }

        let order = Order::from_request(&request);
        let order_id = order.id_typed();
        self.order_store.insert(order).await?;

        self.reconciler.enqueue(request);

        Ok(order_id)
    }

    /// All persisted orders, in whatever order the store provides.
    pub async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.order_store.list().await
    }

    /// Stock record by id (read endpoint only; the order flow looks up by
    /// title).
    pub async fn get_stock(&self, id: StockRecordId) -> Result<Option<StockRecord>, StoreError> {
        self.stock_store.find_by_id(id).await
    }

    /// Reconciler counters (tests/operations; not exposed over HTTP).
    pub fn reconciler_stats(&self) -> ReconcilerStats {
        self.reconciler.stats()
    }
}

/// Build services over in-memory stores, pre-seeded with the given stock.
pub async fn build_in_memory_services(
    seed: Vec<StockRecord>,
) -> Result<AppServices, StoreError> {
    let stock_store = Arc::new(InMemoryStockStore::new());
    apply_stock_seed(&*stock_store, seed).await?;
    Ok(AppServices::new(
        stock_store,
        Arc::new(InMemoryOrderStore::new()),
    ))
}

/// Build services from the environment.
///
/// With the `postgres` feature and `DATABASE_URL` set, stores are
/// Postgres-backed; otherwise in-memory. `STOCK_SEED_PATH` optionally names a
/// JSON seed file applied to the stock store at startup.
pub async fn build_services_from_env() -> anyhow::Result<AppServices> {
    let (stock_store, order_store) = stores_from_env().await?;
    seed_from_env(&*stock_store).await?;
    Ok(AppServices::new(stock_store, order_store))
}

async fn stores_from_env() -> anyhow::Result<(Arc<dyn StockStore>, Arc<dyn OrderStore>)> {
    #[cfg(feature = "postgres")]
    if let Ok(database_url) = std::env::var("DATABASE_URL") {
        let pool = sqlx::PgPool::connect(&database_url)
            .await
            .context("failed to connect to Postgres")?;
        tracing::info!("using Postgres stores");
        return Ok((
            Arc::new(PostgresStockStore::new(pool.clone())),
            Arc::new(PostgresOrderStore::new(pool)),
        ));
    }

    tracing::info!("using in-memory stores");
    Ok((
        Arc::new(InMemoryStockStore::new()),
        Arc::new(InMemoryOrderStore::new()),
    ))
}

async fn seed_from_env(stock_store: &dyn StockStore) -> anyhow::Result<()> {
    match std::env::var("STOCK_SEED_PATH") {
        Ok(path) => {
            let records = load_stock_seed(&path)?;
            let applied = apply_stock_seed(stock_store, records).await?;
            tracing::info!(records = applied, path = %path, "stock seed applied");
        }
        Err(_) => {
            tracing::warn!("STOCK_SEED_PATH not set; starting with empty stock");
        }
    }
    Ok(())
}
