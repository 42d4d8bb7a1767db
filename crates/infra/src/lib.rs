//! Infrastructure layer: storage adapters and configuration.

pub mod catalog_store;
pub mod config;

pub use catalog_store::{InMemoryCatalogStore, PostgresCatalogStore};
pub use config::{AppConfig, ConfigError};
