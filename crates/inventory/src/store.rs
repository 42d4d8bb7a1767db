//! Storage gateway ports consumed by the category and item rules.
//!
//! Adapters (in-memory, Postgres) live in `stockroom-infra`; this crate only
//! names the operations and the failure conditions the rules react to.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockroom_core::{CategoryId, ItemId};

use crate::category::{Category, NewCategory};
use crate::item::{Item, NewItem};

/// Failure reported by a storage gateway.
///
/// `DuplicateKey` and `ForeignKey` are the constraint conditions the rules
/// translate into typed domain errors. Everything else is `Backend` and is
/// propagated to the caller untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// A referential constraint rejected the write or delete.
    #[error("foreign key violation: {0}")]
    ForeignKey(String),

    /// Any other storage failure (connectivity, decoding, ...).
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Durable category records.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a category. Fails with `DuplicateKey` when the name is taken.
    async fn create(&self, new: NewCategory) -> StoreResult<Category>;
    async fn find_by_id(&self, id: CategoryId) -> StoreResult<Option<Category>>;
    /// All categories, most recently created first.
    async fn list(&self) -> StoreResult<Vec<Category>>;
    /// Fails with `ForeignKey` when items still reference the category.
    async fn delete_by_id(&self, id: CategoryId) -> StoreResult<()>;
}

/// Durable item records.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert an item. Fails with `ForeignKey` when the category is gone.
    async fn create(&self, new: NewItem) -> StoreResult<Item>;
    async fn find_by_id(&self, id: ItemId) -> StoreResult<Option<Item>>;
    /// Items most recently created first, restricted to one category when given.
    async fn list(&self, category_id: Option<CategoryId>) -> StoreResult<Vec<Item>>;
    async fn delete_by_id(&self, id: ItemId) -> StoreResult<()>;
    async fn count_by_category_id(&self, category_id: CategoryId) -> StoreResult<u64>;
}

#[async_trait]
impl<S> CategoryRepository for Arc<S>
where
    S: CategoryRepository + ?Sized,
{
    async fn create(&self, new: NewCategory) -> StoreResult<Category> {
        (**self).create(new).await
    }

    async fn find_by_id(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        (**self).find_by_id(id).await
    }

    async fn list(&self) -> StoreResult<Vec<Category>> {
        (**self).list().await
    }

    async fn delete_by_id(&self, id: CategoryId) -> StoreResult<()> {
        (**self).delete_by_id(id).await
    }
}

#[async_trait]
impl<S> ItemRepository for Arc<S>
where
    S: ItemRepository + ?Sized,
{
    async fn create(&self, new: NewItem) -> StoreResult<Item> {
        (**self).create(new).await
    }

    async fn find_by_id(&self, id: ItemId) -> StoreResult<Option<Item>> {
        (**self).find_by_id(id).await
    }

    async fn list(&self, category_id: Option<CategoryId>) -> StoreResult<Vec<Item>> {
        (**self).list(category_id).await
    }

    async fn delete_by_id(&self, id: ItemId) -> StoreResult<()> {
        (**self).delete_by_id(id).await
    }

    async fn count_by_category_id(&self, category_id: CategoryId) -> StoreResult<u64> {
        (**self).count_by_category_id(category_id).await
    }
}
