use thiserror::Error;

use bookstore_inventory::StockRecord;

/// Why an order was rejected during validation.
///
/// Display strings are part of the HTTP contract and must not change.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The requested title has no stock record at all.
    #[error("Invalid book name")]
    InvalidBook { title: String },

    /// The requested quantity exceeds what is on hand for the title.
    #[error("Not stock available for the book: {title}")]
    InsufficientStock { title: String },
}

impl OrderError {
    /// The title that failed validation.
    pub fn title(&self) -> &str {
        match self {
            OrderError::InvalidBook { title } => title,
            OrderError::InsufficientStock { title } => title,
        }
    }
}

/// Validate one request line against its stock lookup result.
///
/// `stock` is whatever the store returned for an exact, case-sensitive match
/// on `title`. Rejection on quantity is strict less-than: a request equal to
/// the quantity on hand passes even though it consumes every unit.
pub fn check_availability(
    stock: Option<&StockRecord>,
    title: &str,
    requested: i64,
) -> Result<(), OrderError> {
    match stock {
        None => Err(OrderError::InvalidBook {
            title: title.to_string(),
        }),
        Some(record) if !record.can_fulfill(requested) => Err(OrderError::InsufficientStock {
            title: title.to_string(),
        }),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::StockRecordId;
    use proptest::prelude::*;

    fn stock(quantity: i64) -> StockRecord {
        StockRecord::new(StockRecordId::new(), "Dune", quantity)
    }

    #[test]
    fn missing_record_is_invalid_book() {
        let err = check_availability(None, "Foo", 1).unwrap_err();
        assert_eq!(err, OrderError::InvalidBook { title: "Foo".into() });
        assert_eq!(err.to_string(), "Invalid book name");
    }

    #[test]
    fn short_stock_names_the_title() {
        let err = check_availability(Some(&stock(5)), "Dune", 7).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Not stock available for the book: Dune"
        );
    }

    #[test]
    fn exact_stock_passes() {
        assert!(check_availability(Some(&stock(5)), "Dune", 5).is_ok());
    }

    proptest! {
        #[test]
        fn accepts_iff_stock_covers_request(
            quantity in -1000i64..1000,
            requested in -1000i64..1000,
        ) {
            let result = check_availability(Some(&stock(quantity)), "Dune", requested);
            prop_assert_eq!(result.is_ok(), quantity >= requested);
        }
    }
}
