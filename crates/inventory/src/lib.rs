//! Inventory domain module.
//!
//! This crate contains business rules for quantity-on-hand stock records,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod stock;

pub use stock::StockRecord;
