//! Hand-written gateway doubles for the rules tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use stockroom_core::{CategoryId, ItemId};

use crate::category::{Category, NewCategory};
use crate::item::{Item, NewItem};
use crate::store::{CategoryRepository, ItemRepository, StoreError, StoreResult};

#[derive(Debug, Default)]
struct CategoryState {
    rows: Vec<Category>,
    fail_writes: Option<StoreError>,
}

/// Category table with a unique name, newest first.
#[derive(Debug, Clone, Default)]
pub struct FakeCategories {
    state: Arc<Mutex<CategoryState>>,
}

impl FakeCategories {
    pub fn with_existing(ids: &[CategoryId]) -> Self {
        let fake = Self::default();
        {
            let mut state = fake.state.lock().unwrap();
            for (n, id) in ids.iter().enumerate() {
                state.rows.insert(
                    0,
                    Category {
                        id: *id,
                        name: format!("C{n}"),
                        created_at: Utc::now(),
                    },
                );
            }
        }
        fake
    }

    /// Make every subsequent create/delete fail with `err`.
    pub fn fail_writes_with(&self, err: StoreError) {
        self.state.lock().unwrap().fail_writes = Some(err);
    }
}

#[async_trait]
impl CategoryRepository for FakeCategories {
    async fn create(&self, new: NewCategory) -> StoreResult<Category> {
        let mut state = self.state.lock().unwrap();
        if let Some(err) = state.fail_writes.clone() {
            return Err(err);
        }
        if state.rows.iter().any(|c| c.name == new.name) {
            return Err(StoreError::DuplicateKey("categories_name_key".into()));
        }
        let created = Category {
            id: CategoryId::new(),
            name: new.name,
            created_at: Utc::now(),
        };
        state.rows.insert(0, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        let state = self.state.lock().unwrap();
        Ok(state.rows.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Category>> {
        Ok(self.state.lock().unwrap().rows.clone())
    }

    async fn delete_by_id(&self, id: CategoryId) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(err) = state.fail_writes.clone() {
            return Err(err);
        }
        state.rows.retain(|c| c.id != id);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct ItemState {
    rows: Vec<Item>,
    counts: HashMap<CategoryId, u64>,
    created: Vec<NewItem>,
    listed: Vec<Option<CategoryId>>,
    fail_writes: Option<StoreError>,
}

/// Item table that records what the rules asked of it.
#[derive(Debug, Clone, Default)]
pub struct FakeItems {
    state: Arc<Mutex<ItemState>>,
}

impl FakeItems {
    /// Pin the reference count reported for a category.
    pub fn set_count(&self, category_id: CategoryId, count: u64) {
        self.state.lock().unwrap().counts.insert(category_id, count);
    }

    pub fn fail_writes_with(&self, err: StoreError) {
        self.state.lock().unwrap().fail_writes = Some(err);
    }

    pub fn created(&self) -> Vec<NewItem> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn listed(&self) -> Vec<Option<CategoryId>> {
        self.state.lock().unwrap().listed.clone()
    }
}

#[async_trait]
impl ItemRepository for FakeItems {
    async fn create(&self, new: NewItem) -> StoreResult<Item> {
        let mut state = self.state.lock().unwrap();
        if let Some(err) = state.fail_writes.clone() {
            return Err(err);
        }
        state.created.push(new.clone());
        let created = Item {
            id: ItemId::new(),
            name: new.name,
            quantity: new.quantity,
            category_id: new.category_id,
            created_at: Utc::now(),
        };
        state.rows.insert(0, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: ItemId) -> StoreResult<Option<Item>> {
        let state = self.state.lock().unwrap();
        Ok(state.rows.iter().find(|i| i.id == id).cloned())
    }

    async fn list(&self, category_id: Option<CategoryId>) -> StoreResult<Vec<Item>> {
        let mut state = self.state.lock().unwrap();
        state.listed.push(category_id);
        Ok(state
            .rows
            .iter()
            .filter(|i| category_id.is_none_or(|c| i.category_id == c))
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: ItemId) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(err) = state.fail_writes.clone() {
            return Err(err);
        }
        state.rows.retain(|i| i.id != id);
        Ok(())
    }

    async fn count_by_category_id(&self, category_id: CategoryId) -> StoreResult<u64> {
        let state = self.state.lock().unwrap();
        Ok(match state.counts.get(&category_id) {
            Some(n) => *n,
            None => state.rows.iter().filter(|i| i.category_id == category_id).count() as u64,
        })
    }
}
