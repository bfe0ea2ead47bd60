//! Observability: tracing/logging initialization.

pub mod tracing;

pub use crate::tracing::init;
