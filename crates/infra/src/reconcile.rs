//! Fire-and-forget stock reconciliation.
//!
//! Acceptance returns to the caller before stock is decremented; the actual
//! decrement runs here, on a background worker fed through a channel. A
//! failure is logged and counted, never retried, never rolled back, and never
//! reported to the caller who already received a success response.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use bookstore_orders::OrderRequest;

use crate::store::{StockStore, StoreError};

/// Reconciler configuration.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Name for logging.
    pub name: String,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            name: "stock-reconciler".to_string(),
        }
    }
}

impl ReconcilerConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Why a reconciliation attempt failed.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The stock record vanished between acceptance and reconciliation.
    #[error("no stock record for title: {title}")]
    MissingStock { title: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Worker runtime statistics.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ReconcilerStats {
    pub requests_processed: u64,
    pub requests_succeeded: u64,
    pub requests_failed: u64,
}

#[derive(Debug, Default)]
struct Counters {
    processed: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
}

/// Handle to a running reconciler.
#[derive(Debug)]
pub struct ReconcilerHandle {
    tx: mpsc::UnboundedSender<OrderRequest>,
    join: JoinHandle<()>,
    counters: Arc<Counters>,
}

impl ReconcilerHandle {
    /// Queue a request for reconciliation without blocking.
    ///
    /// There is no return channel: the caller cannot observe whether the
    /// decrement ever happens.
    pub fn enqueue(&self, request: OrderRequest) {
        if self.tx.send(request).is_err() {
            error!("stock reconciler is gone; dropping reconciliation request");
        }
    }

    /// Get current worker statistics.
    pub fn stats(&self) -> ReconcilerStats {
        ReconcilerStats {
            requests_processed: self.counters.processed.load(Ordering::Relaxed),
            requests_succeeded: self.counters.succeeded.load(Ordering::Relaxed),
            requests_failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }

    /// Request graceful shutdown: drain queued requests, stop, and return the
    /// final statistics.
    pub async fn shutdown(self) -> ReconcilerStats {
        drop(self.tx);
        let _ = self.join.await;
        ReconcilerStats {
            requests_processed: self.counters.processed.load(Ordering::Relaxed),
            requests_succeeded: self.counters.succeeded.load(Ordering::Relaxed),
            requests_failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}

/// Background stock-decrement worker.
pub struct StockReconciler;

impl StockReconciler {
    /// Spawn the worker on the current tokio runtime.
    pub fn spawn(store: Arc<dyn StockStore>, config: ReconcilerConfig) -> ReconcilerHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let counters = Arc::new(Counters::default());

        let join = tokio::spawn(worker_loop(store, config, rx, counters.clone()));

        ReconcilerHandle { tx, join, counters }
    }
}

async fn worker_loop(
    store: Arc<dyn StockStore>,
    config: ReconcilerConfig,
    mut rx: mpsc::UnboundedReceiver<OrderRequest>,
    counters: Arc<Counters>,
) {
    info!(reconciler = %config.name, "stock reconciler started");

    while let Some(request) = rx.recv().await {
        counters.processed.fetch_add(1, Ordering::Relaxed);

        match reconcile_order(&*store, &request).await {
            Ok(()) => {
                counters.succeeded.fetch_add(1, Ordering::Relaxed);
                debug!(
                    reconciler = %config.name,
                    books = request.books.len(),
                    quantity = request.quantity,
                    "stock reconciled"
                );
            }
            Err(e) => {
                // Task boundary: log and move on. The order already stands.
                counters.failed.fetch_add(1, Ordering::Relaxed);
                error!(
                    reconciler = %config.name,
                    error = %e,
                    "stock reconciliation failed"
                );
            }
        }
    }

    info!(reconciler = %config.name, "stock reconciler stopped");
}

/// Decrement stock for every book of a request.
///
/// Re-fetches each record by title, subtracts the request's scalar quantity,
/// and saves. The first failure aborts the remaining books of the request;
/// records already written stay written.
pub async fn reconcile_order(
    store: &dyn StockStore,
    request: &OrderRequest,
) -> Result<(), ReconcileError> {
    for book in &request.books {
        let mut record = store.find_by_name(book.title()).await?.ok_or_else(|| {
            ReconcileError::MissingStock {
                title: book.title().to_string(),
            }
        })?;

        record.deduct(request.quantity);
        store.save(record).await?;
    }

    Ok(())
}
