//! Postgres-backed catalog store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError | Scenario |
//! |------------|----------------------|------------|----------|
//! | Database (unique violation) | `23505` | `DuplicateKey` | Category name already taken |
//! | Database (foreign key violation) | `23503` | `ForeignKey` | Item insert for a deleted category, or category delete while items remain |
//! | Database (other) | Any other | `Backend` | Check constraints, permissions, ... |
//! | Other | N/A | `Backend` | Pool closed, network errors, decoding |
//!
//! The `items.category_id` foreign key uses `ON DELETE RESTRICT`, so the
//! deletion guard holds even when an item is inserted between the rules'
//! count check and the delete.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use stockroom_core::{CategoryId, ItemId};
use stockroom_inventory::{
    Category, CategoryRepository, Item, ItemRepository, NewCategory, NewItem, StoreError,
    StoreResult,
};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        quantity DOUBLE PRECISION NOT NULL CHECK (quantity >= 0),
        category_id UUID NOT NULL REFERENCES categories (id) ON DELETE RESTRICT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS items_category_id_idx ON items (category_id)",
];

/// Postgres-backed store for categories and items.
///
/// Uses SQLx connection pool which is thread-safe (Arc + Send + Sync).
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: Arc<PgPool>,
}

impl PostgresCatalogStore {
    /// Create a new PostgresCatalogStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `categories` and `items` tables if they do not exist.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(*statement)
                .execute(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        }
        Ok(())
    }

    /// Close every pooled connection; in-flight queries finish first.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl CategoryRepository for PostgresCatalogStore {
    #[instrument(skip(self, new), fields(name = %new.name), err)]
    async fn create(&self, new: NewCategory) -> StoreResult<Category> {
        let id = CategoryId::new();
        let row = sqlx::query(
            r#"
            INSERT INTO categories (id, name)
            VALUES ($1, $2)
            RETURNING id, name, created_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(&new.name)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_category", e))?;

        category_from_row(&row)
    }

    #[instrument(skip(self), fields(category_id = %id), err)]
    async fn find_by_id(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        let row = sqlx::query("SELECT id, name, created_at FROM categories WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_category", e))?;

        row.as_ref().map(category_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> StoreResult<Vec<Category>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, created_at
            FROM categories
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_categories", e))?;

        rows.iter().map(category_from_row).collect()
    }

    #[instrument(skip(self), fields(category_id = %id), err)]
    async fn delete_by_id(&self, id: CategoryId) -> StoreResult<()> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_category", e))?;
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for PostgresCatalogStore {
    #[instrument(skip(self, new), fields(category_id = %new.category_id), err)]
    async fn create(&self, new: NewItem) -> StoreResult<Item> {
        let id = ItemId::new();
        let row = sqlx::query(
            r#"
            INSERT INTO items (id, name, quantity, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, quantity, category_id, created_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(&new.name)
        .bind(new.quantity)
        .bind(new.category_id.as_uuid())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_item", e))?;

        item_from_row(&row)
    }

    #[instrument(skip(self), fields(item_id = %id), err)]
    async fn find_by_id(&self, id: ItemId) -> StoreResult<Option<Item>> {
        let row = sqlx::query(
            "SELECT id, name, quantity, category_id, created_at FROM items WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_item", e))?;

        row.as_ref().map(item_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn list(&self, category_id: Option<CategoryId>) -> StoreResult<Vec<Item>> {
        let category_param: Option<uuid::Uuid> = category_id.map(Into::into);

        let rows = sqlx::query(
            r#"
            SELECT id, name, quantity, category_id, created_at
            FROM items
            WHERE ($1::uuid IS NULL OR category_id = $1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(category_param)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_items", e))?;

        rows.iter().map(item_from_row).collect()
    }

    #[instrument(skip(self), fields(item_id = %id), err)]
    async fn delete_by_id(&self, id: ItemId) -> StoreResult<()> {
        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_item", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(category_id = %category_id), err)]
    async fn count_by_category_id(&self, category_id: CategoryId) -> StoreResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM items WHERE category_id = $1")
            .bind(category_id.as_uuid())
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("count_items", e))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| map_sqlx_error("count_items", e))?;
        Ok(total.max(0) as u64)
    }
}

// SQLx row types

#[derive(Debug)]
struct CategoryRow {
    id: uuid::Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, PgRow> for CategoryRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(CategoryRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: CategoryId::from_uuid(row.id),
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug)]
struct ItemRow {
    id: uuid::Uuid,
    name: String,
    quantity: f64,
    category_id: uuid::Uuid,
    created_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, PgRow> for ItemRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ItemRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            quantity: row.try_get("quantity")?,
            category_id: row.try_get("category_id")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: ItemId::from_uuid(row.id),
            name: row.name,
            quantity: row.quantity,
            category_id: CategoryId::from_uuid(row.category_id),
            created_at: row.created_at,
        }
    }
}

fn category_from_row(row: &PgRow) -> StoreResult<Category> {
    <CategoryRow as sqlx::FromRow<PgRow>>::from_row(row)
        .map(Category::from)
        .map_err(|e| map_sqlx_error("decode_category", e))
}

fn item_from_row(row: &PgRow) -> StoreResult<Item> {
    <ItemRow as sqlx::FromRow<PgRow>>::from_row(row)
        .map(Item::from)
        .map_err(|e| map_sqlx_error("decode_item", e))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());

            match db_err.code().as_deref() {
                Some("23505") => StoreError::DuplicateKey(msg),
                Some("23503") => StoreError::ForeignKey(msg),
                _ => StoreError::Backend(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Backend(format!("connection pool closed in {}", operation))
        }
        _ => StoreError::Backend(format!("sqlx error in {}: {}", operation, err)),
    }
}
