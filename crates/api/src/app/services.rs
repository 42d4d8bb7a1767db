//! Service wiring: picks a storage gateway and builds the catalog rules on it.

use std::sync::Arc;

use stockroom_infra::{AppConfig, InMemoryCatalogStore, PostgresCatalogStore};
use stockroom_inventory::{
    CategoryRepository, CategoryService, ItemRepository, ItemService, StoreError,
};

pub type DynCategories = Arc<dyn CategoryRepository>;
pub type DynItems = Arc<dyn ItemRepository>;

/// Rules shared by every request handler.
pub struct AppServices {
    pub categories: CategoryService<DynCategories, DynItems>,
    pub items: ItemService<DynItems, DynCategories>,
    postgres: Option<PostgresCatalogStore>,
}

impl AppServices {
    /// Build the rules over explicit gateway handles.
    pub fn new(categories: DynCategories, items: DynItems) -> Self {
        Self {
            categories: CategoryService::new(categories.clone(), items.clone()),
            items: ItemService::new(items, categories),
            postgres: None,
        }
    }

    /// In-memory gateway (dev/test).
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryCatalogStore::new());
        Self::new(store.clone(), store)
    }

    /// Postgres gateway when `DATABASE_URL` is configured, in-memory otherwise.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let Some(database_url) = config.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL not set; using in-memory catalog store");
            return Ok(Self::in_memory());
        };

        let store = PostgresCatalogStore::connect(database_url, config.database_max_connections).await?;
        store.ensure_schema().await?;
        tracing::info!("connected to postgres catalog store");

        let shared = Arc::new(store.clone());
        let mut services = Self::new(shared.clone(), shared);
        services.postgres = Some(store);
        Ok(services)
    }

    /// Release storage resources (closes the Postgres pool, if any).
    pub async fn shutdown(&self) {
        if let Some(store) = &self.postgres {
            store.close().await;
            tracing::info!("postgres pool closed");
        }
    }
}
