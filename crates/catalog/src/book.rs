use serde::{Deserialize, Serialize};

use bookstore_core::{BookId, Entity};

/// A book referenced by an order.
///
/// Immutable once created: orders keep their own copies, so a book inside one
/// order never aliases a book inside another. The `title` doubles as the
/// lookup key into stock; matching is case-sensitive and exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    id: BookId,
    title: String,
}

impl Book {
    /// Create a book with a freshly generated id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: BookId::new(),
            title: title.into(),
        }
    }

    /// Create a book with an explicit id (deserialization, tests).
    pub fn with_id(id: BookId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    pub fn id_typed(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Entity for Book {
    type Id = BookId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_books_get_distinct_ids() {
        let a = Book::new("Dune");
        let b = Book::new("Dune");
        assert_ne!(a.id_typed(), b.id_typed());
        assert_eq!(a.title(), b.title());
    }

    #[test]
    fn deserialize_without_id_generates_one() {
        let book: Book = serde_json::from_str(r#"{"title":"Dune"}"#).unwrap();
        assert_eq!(book.title(), "Dune");
    }

    #[test]
    fn deserialize_keeps_explicit_id() {
        let id = BookId::new();
        let raw = format!(r#"{{"id":"{id}","title":"Dune"}}"#);
        let book: Book = serde_json::from_str(&raw).unwrap();
        assert_eq!(book.id_typed(), id);
    }
}
