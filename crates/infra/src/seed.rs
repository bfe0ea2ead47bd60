//! Stock seed loading.
//!
//! Stock records are created entirely outside the order flow; a deployment
//! boots with a JSON file of `{ "id"?, "name", "quantity" }` entries. Entries
//! without an explicit id get a generated one.

use std::path::Path;

use thiserror::Error;

use bookstore_inventory::StockRecord;

use crate::store::{StockStore, StoreError};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Parse a seed document (JSON array of stock records).
pub fn parse_stock_seed(raw: &str) -> Result<Vec<StockRecord>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Load and parse a seed file.
pub fn load_stock_seed(path: impl AsRef<Path>) -> Result<Vec<StockRecord>, SeedError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_stock_seed(&raw).map_err(|source| SeedError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Write seed records into the stock store. Returns how many were applied.
pub async fn apply_stock_seed(
    store: &dyn StockStore,
    records: Vec<StockRecord>,
) -> Result<usize, StoreError> {
    let count = records.len();
    for record in records {
        store.save(record).await?;
    }
    Ok(count)
}
