use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, Entity, ItemId};

use crate::error::{CATEGORY_NOT_FOUND, CatalogError, CatalogResult, ITEM_NOT_FOUND};
use crate::store::{CategoryRepository, ItemRepository, StoreError};
use crate::validate;

/// A quantified entry belonging to exactly one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: f64,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Validated payload for inserting an item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub quantity: f64,
    pub category_id: CategoryId,
}

/// Caller-supplied item fields, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateItemInput {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub category_id: Option<String>,
}

/// Optional restriction for item listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub category_id: Option<String>,
}

/// Item creation, listing and deletion.
#[derive(Debug, Clone)]
pub struct ItemService<I, C> {
    items: I,
    categories: C,
}

impl<I, C> ItemService<I, C>
where
    I: ItemRepository,
    C: CategoryRepository,
{
    pub fn new(items: I, categories: C) -> Self {
        Self { items, categories }
    }

    /// Validate and insert an item.
    ///
    /// Checks run in a fixed order and the first failure wins: name, quantity,
    /// category reference shape, then category existence (the only check that
    /// touches storage).
    pub async fn create_item(&self, input: CreateItemInput) -> CatalogResult<Item> {
        let name = validate::required_name(input.name.as_deref())?;
        let quantity = validate::non_negative_quantity(input.quantity)?;
        let raw_category_id = validate::required_category_id(input.category_id.as_deref())?;

        let not_found = || CatalogError::not_found(CATEGORY_NOT_FOUND);
        let category_id: CategoryId = raw_category_id.parse().map_err(|_| not_found())?;
        if self.categories.find_by_id(category_id).await?.is_none() {
            return Err(not_found());
        }

        let new = NewItem {
            name,
            quantity,
            category_id,
        };
        match self.items.create(new).await {
            Ok(item) => Ok(item),
            // Category removed between the lookup and the insert.
            Err(StoreError::ForeignKey(_)) => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }

    /// List items, newest first. An empty or unknown `category_id` filter is
    /// not an error: empty means "no filter", unknown matches nothing.
    pub async fn list_items(&self, filter: ItemFilter) -> CatalogResult<Vec<Item>> {
        let category_id = match filter.category_id.as_deref() {
            None | Some("") => None,
            Some(raw) => match raw.parse::<CategoryId>() {
                Ok(id) => Some(id),
                Err(_) => return Ok(Vec::new()),
            },
        };

        Ok(self.items.list(category_id).await?)
    }

    pub async fn delete_item(&self, id: &str) -> CatalogResult<()> {
        let not_found = || CatalogError::not_found(ITEM_NOT_FOUND);

        let id: ItemId = id.parse().map_err(|_| not_found())?;
        if self.items.find_by_id(id).await?.is_none() {
            return Err(not_found());
        }

        Ok(self.items.delete_by_id(id).await?)
    }
}
