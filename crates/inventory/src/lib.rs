//! Inventory catalog rules: categories and the items that reference them.
//!
//! This crate holds the validation and referential-integrity decisions only.
//! Storage is reached through the ports in [`store`]; HTTP lives in
//! `stockroom-api`.

pub mod category;
pub mod error;
pub mod item;
pub mod store;
pub mod validate;

#[cfg(test)]
mod testing;

pub use category::{Category, CategoryService, NewCategory};
pub use error::{CatalogError, CatalogResult};
pub use item::{CreateItemInput, Item, ItemFilter, ItemService, NewItem};
pub use store::{CategoryRepository, ItemRepository, StoreError, StoreResult};
