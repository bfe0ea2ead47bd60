//! Postgres-backed store implementations.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE book_stock (
//!     id       UUID PRIMARY KEY,
//!     name     TEXT NOT NULL,
//!     quantity BIGINT NOT NULL
//! );
//!
//! CREATE TABLE orders (
//!     id         UUID PRIMARY KEY,
//!     quantity   BIGINT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//!
//! -- Order-owned book copies: cascade-deleted with their order.
//! CREATE TABLE order_books (
//!     order_id UUID NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
//!     position INT  NOT NULL,
//!     book_id  UUID NOT NULL,
//!     title    TEXT NOT NULL,
//!     PRIMARY KEY (order_id, position)
//! );
//! ```
//!
//! The two record sets are deliberately unlinked: `order_books.title` is a
//! copied string, never a foreign key into `book_stock`.

use sqlx::{PgPool, Row};
use uuid::Uuid;

use bookstore_catalog::Book;
use bookstore_core::{BookId, OrderId, StockRecordId};
use bookstore_inventory::StockRecord;
use bookstore_orders::Order;

use super::{OrderStore, StockStore, StoreError};

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// Postgres-backed stock store (`book_stock` table).
pub struct PostgresStockStore {
    pool: PgPool,
}

impl PostgresStockStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn stock_from_row(row: &sqlx::postgres::PgRow) -> Result<StockRecord, StoreError> {
    let id = row.try_get::<Uuid, _>("id").map_err(backend)?;
    let name = row.try_get::<String, _>("name").map_err(backend)?;
    let quantity = row.try_get::<i64, _>("quantity").map_err(backend)?;
    Ok(StockRecord::new(
        StockRecordId::from_uuid(id),
        name,
        quantity,
    ))
}

#[async_trait::async_trait]
impl StockStore for PostgresStockStore {
    async fn find_by_id(&self, id: StockRecordId) -> Result<Option<StockRecord>, StoreError> {
        let row = sqlx::query("SELECT id, name, quantity FROM book_stock WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        row.as_ref().map(stock_from_row).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<StockRecord>, StoreError> {
        let row = sqlx::query("SELECT id, name, quantity FROM book_stock WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        row.as_ref().map(stock_from_row).transpose()
    }

    async fn save(&self, record: StockRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO book_stock (id, name, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (id)
            DO UPDATE SET name = EXCLUDED.name, quantity = EXCLUDED.quantity
            "#,
        )
        .bind(record.id_typed().as_uuid())
        .bind(record.name())
        .bind(record.quantity())
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(())
    }
}

/// Postgres-backed order store (`orders` + `order_books` tables).
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert(&self, order: Order) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;

        sqlx::query("INSERT INTO orders (id, quantity) VALUES ($1, $2)")
            .bind(order.id_typed().as_uuid())
            .bind(order.quantity())
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        for (position, book) in order.books().iter().enumerate() {
            sqlx::query(
                "INSERT INTO order_books (order_id, position, book_id, title) VALUES ($1, $2, $3, $4)",
            )
            .bind(order.id_typed().as_uuid())
            .bind(position as i32)
            .bind(book.id_typed().as_uuid())
            .bind(book.title())
            .execute(&mut *tx)
            .await
            .map_err(backend)?;
        }

        tx.commit().await.map_err(backend)
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let order_rows =
            sqlx::query("SELECT id, quantity FROM orders ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await
                .map_err(backend)?;

        let mut orders = Vec::with_capacity(order_rows.len());
        for row in &order_rows {
            let id = row.try_get::<Uuid, _>("id").map_err(backend)?;
            let quantity = row.try_get::<i64, _>("quantity").map_err(backend)?;

            let book_rows = sqlx::query(
                "SELECT book_id, title FROM order_books WHERE order_id = $1 ORDER BY position",
            )
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;

            let mut books = Vec::with_capacity(book_rows.len());
            for book_row in &book_rows {
                let book_id = book_row.try_get::<Uuid, _>("book_id").map_err(backend)?;
                let title = book_row.try_get::<String, _>("title").map_err(backend)?;
                books.push(Book::with_id(BookId::from_uuid(book_id), title));
            }

            orders.push(Order::from_parts(OrderId::from_uuid(id), books, quantity));
        }

        Ok(orders)
    }
}
