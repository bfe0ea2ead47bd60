use serde::{Deserialize, Serialize};

use bookstore_core::{Entity, StockRecordId};

/// Quantity-on-hand for one book title.
///
/// Stock records live independently of orders and books: they are created as
/// seed data, keyed by `name` (the book title string, not a foreign key), and
/// mutated only by the reconciliation task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    #[serde(default)]
    id: StockRecordId,
    name: String,
    quantity: i64,
}

impl StockRecord {
    pub fn new(id: StockRecordId, name: impl Into<String>, quantity: i64) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
        }
    }

    pub fn id_typed(&self) -> StockRecordId {
        self.id
    }

    /// Lookup key: the book title this record holds stock for.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Whether a request for `requested` units can be accepted.
    ///
    /// Rejection is strict less-than: a request that consumes every unit on
    /// hand is still accepted.
    pub fn can_fulfill(&self, requested: i64) -> bool {
        self.quantity >= requested
    }

    /// Subtract `requested` units. Unguarded: quantity may go negative when
    /// concurrent acceptances validated against the same stale count.
    pub fn deduct(&mut self, requested: i64) {
        self.quantity -= requested;
    }
}

impl Entity for StockRecord {
    type Id = StockRecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
