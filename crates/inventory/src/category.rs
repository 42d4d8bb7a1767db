use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, Entity};

use crate::error::{
    CATEGORY_EXISTS, CATEGORY_IN_USE, CATEGORY_NOT_FOUND, CatalogError, CatalogResult,
};
use crate::store::{CategoryRepository, ItemRepository, StoreError};
use crate::validate;

/// A named grouping that items reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Validated payload for inserting a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

/// Category creation, listing and guarded deletion.
#[derive(Debug, Clone)]
pub struct CategoryService<C, I> {
    categories: C,
    items: I,
}

impl<C, I> CategoryService<C, I>
where
    C: CategoryRepository,
    I: ItemRepository,
{
    pub fn new(categories: C, items: I) -> Self {
        Self { categories, items }
    }

    pub async fn create_category(&self, name_raw: Option<&str>) -> CatalogResult<Category> {
        let name = validate::required_name(name_raw)?;

        match self.categories.create(NewCategory { name }).await {
            Ok(category) => Ok(category),
            Err(StoreError::DuplicateKey(_)) => Err(CatalogError::conflict(CATEGORY_EXISTS)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        Ok(self.categories.list().await?)
    }

    /// Delete a category that no item references.
    ///
    /// The item count is checked first so callers get a deterministic conflict;
    /// a `ForeignKey` failure from the gateway (an item inserted after the
    /// count) is reported the same way.
    pub async fn delete_category(&self, id: &str) -> CatalogResult<()> {
        let not_found = || CatalogError::not_found(CATEGORY_NOT_FOUND);

        let id: CategoryId = id.parse().map_err(|_| not_found())?;
        if self.categories.find_by_id(id).await?.is_none() {
            return Err(not_found());
        }

        if self.items.count_by_category_id(id).await? > 0 {
            return Err(CatalogError::conflict(CATEGORY_IN_USE));
        }

        match self.categories.delete_by_id(id).await {
            Ok(()) => Ok(()),
            Err(StoreError::ForeignKey(_)) => Err(CatalogError::conflict(CATEGORY_IN_USE)),
            Err(e) => Err(e.into()),
        }
    }
}
