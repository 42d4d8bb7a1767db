use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use stockroom_core::{CategoryId, Entity, ItemId};
use stockroom_inventory::{
    Category, CategoryRepository, Item, ItemRepository, NewCategory, NewItem, StoreError,
    StoreResult,
};

/// Rows of one entity kind, kept in insertion order.
#[derive(Debug)]
struct Table<E> {
    rows: Vec<E>,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<E: Entity + Clone> Table<E> {
    fn get(&self, id: &E::Id) -> Option<E> {
        self.rows.iter().find(|r| r.id() == id).cloned()
    }

    fn remove(&mut self, id: &E::Id) {
        self.rows.retain(|r| r.id() != id);
    }

    /// Most recently created first; insertion order breaks timestamp ties.
    fn newest_first(&self) -> impl Iterator<Item = &E> {
        self.rows.iter().rev()
    }
}

#[derive(Debug, Default)]
struct Tables {
    categories: Table<Category>,
    items: Table<Item>,
}

/// In-memory catalog store for tests/dev.
///
/// Both tables sit behind one lock, so the name uniqueness check and the
/// category/item reference checks are atomic with the write they guard.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<Tables>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalogStore {
    async fn create(&self, new: NewCategory) -> StoreResult<Category> {
        let mut tables = self.write()?;
        if tables.categories.rows.iter().any(|c| c.name == new.name) {
            return Err(StoreError::DuplicateKey(format!(
                "category name '{}' already exists",
                new.name
            )));
        }

        let category = Category {
            id: CategoryId::new(),
            name: new.name,
            created_at: Utc::now(),
        };
        tables.categories.rows.push(category.clone());
        Ok(category)
    }

    async fn find_by_id(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        Ok(self.read()?.categories.get(&id))
    }

    async fn list(&self) -> StoreResult<Vec<Category>> {
        Ok(self.read()?.categories.newest_first().cloned().collect())
    }

    async fn delete_by_id(&self, id: CategoryId) -> StoreResult<()> {
        let mut tables = self.write()?;
        if tables.items.rows.iter().any(|i| i.category_id == id) {
            return Err(StoreError::ForeignKey(format!(
                "category {id} is still referenced by items"
            )));
        }
        tables.categories.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for InMemoryCatalogStore {
    async fn create(&self, new: NewItem) -> StoreResult<Item> {
        let mut tables = self.write()?;
        if tables.categories.get(&new.category_id).is_none() {
            return Err(StoreError::ForeignKey(format!(
                "category {} does not exist",
                new.category_id
            )));
        }

        let item = Item {
            id: ItemId::new(),
            name: new.name,
            quantity: new.quantity,
            category_id: new.category_id,
            created_at: Utc::now(),
        };
        tables.items.rows.push(item.clone());
        Ok(item)
    }

    async fn find_by_id(&self, id: ItemId) -> StoreResult<Option<Item>> {
        Ok(self.read()?.items.get(&id))
    }

    async fn list(&self, category_id: Option<CategoryId>) -> StoreResult<Vec<Item>> {
        Ok(self
            .read()?
            .items
            .newest_first()
            .filter(|i| category_id.is_none_or(|c| i.category_id == c))
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: ItemId) -> StoreResult<()> {
        self.write()?.items.remove(&id);
        Ok(())
    }

    async fn count_by_category_id(&self, category_id: CategoryId) -> StoreResult<u64> {
        let tables = self.read()?;
        let count = tables
            .items
            .rows
            .iter()
            .filter(|i| i.category_id == category_id)
            .count();
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn category(store: &InMemoryCatalogStore, name: &str) -> Category {
        CategoryRepository::create(
            store,
            NewCategory {
                name: name.to_string(),
            },
        )
        .await
        .unwrap()
    }

    async fn item(store: &InMemoryCatalogStore, name: &str, category_id: CategoryId) -> Item {
        ItemRepository::create(
            store,
            NewItem {
                name: name.to_string(),
                quantity: 1.0,
                category_id,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn categories_are_listed_newest_first() {
        let store = InMemoryCatalogStore::new();
        let food = category(&store, "Food").await;
        let tools = category(&store, "Tools").await;

        let listed = CategoryRepository::list(&store).await.unwrap();
        assert_eq!(listed, vec![tools, food]);
    }

    #[tokio::test]
    async fn duplicate_category_name_is_rejected() {
        let store = InMemoryCatalogStore::new();
        category(&store, "Food").await;

        let err = CategoryRepository::create(
            &store,
            NewCategory {
                name: "Food".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(_)));
    }

    #[tokio::test]
    async fn items_filter_by_category() {
        let store = InMemoryCatalogStore::new();
        let food = category(&store, "Food").await;
        let tools = category(&store, "Tools").await;
        let bread = item(&store, "Bread", food.id).await;
        let hammer = item(&store, "Hammer", tools.id).await;
        let milk = item(&store, "Milk", food.id).await;

        let all = ItemRepository::list(&store, None).await.unwrap();
        assert_eq!(all, vec![milk.clone(), hammer, bread.clone()]);

        let only_food = ItemRepository::list(&store, Some(food.id)).await.unwrap();
        assert_eq!(only_food, vec![milk, bread]);

        let none = ItemRepository::list(&store, Some(CategoryId::new())).await.unwrap();
        assert!(none.is_empty());

        assert_eq!(store.count_by_category_id(food.id).await.unwrap(), 2);
        assert_eq!(store.count_by_category_id(tools.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn item_requires_existing_category() {
        let store = InMemoryCatalogStore::new();

        let err = ItemRepository::create(
            &store,
            NewItem {
                name: "Bread".to_string(),
                quantity: 2.0,
                category_id: CategoryId::new(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey(_)));
    }

    #[tokio::test]
    async fn referenced_category_cannot_be_deleted() {
        let store = InMemoryCatalogStore::new();
        let food = category(&store, "Food").await;
        let bread = item(&store, "Bread", food.id).await;

        let err = CategoryRepository::delete_by_id(&store, food.id).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey(_)));

        ItemRepository::delete_by_id(&store, bread.id).await.unwrap();
        CategoryRepository::delete_by_id(&store, food.id).await.unwrap();

        assert!(CategoryRepository::find_by_id(&store, food.id).await.unwrap().is_none());
        assert!(ItemRepository::find_by_id(&store, bread.id).await.unwrap().is_none());
    }
}
