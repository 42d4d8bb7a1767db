//! Errors returned by the category and item rules.

use thiserror::Error;

use stockroom_core::DomainError;

use crate::store::StoreError;

pub const NAME_REQUIRED: &str = "name is required";
pub const QUANTITY_INVALID: &str = "quantity must be a non-negative number";
pub const CATEGORY_ID_REQUIRED: &str = "categoryId is required";
pub const CATEGORY_NOT_FOUND: &str = "category not found";
pub const CATEGORY_EXISTS: &str = "category already exists";
pub const CATEGORY_IN_USE: &str = "category is used by items";
pub const ITEM_NOT_FOUND: &str = "item not found";

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Rules-layer failure.
///
/// `Domain` carries the classified outcomes (validation, not found, conflict).
/// `Store` is any gateway failure the rules do not recognize, passed through
/// as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    pub(crate) fn validation(msg: &str) -> Self {
        Self::Domain(DomainError::validation(msg))
    }

    pub(crate) fn not_found(msg: &str) -> Self {
        Self::Domain(DomainError::not_found(msg))
    }

    pub(crate) fn conflict(msg: &str) -> Self {
        Self::Domain(DomainError::conflict(msg))
    }
}
