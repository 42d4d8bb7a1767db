//! Input shape checks that run before any storage round-trip.

use crate::error::{CATEGORY_ID_REQUIRED, CatalogError, NAME_REQUIRED, QUANTITY_INVALID};

/// Trimmed, non-empty name.
pub fn required_name(raw: Option<&str>) -> Result<String, CatalogError> {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(CatalogError::validation(NAME_REQUIRED)),
    }
}

/// Finite quantity greater than or equal to zero.
pub fn non_negative_quantity(raw: Option<f64>) -> Result<f64, CatalogError> {
    match raw {
        Some(q) if q.is_finite() && q >= 0.0 => Ok(q),
        _ => Err(CatalogError::validation(QUANTITY_INVALID)),
    }
}

/// Present, non-empty category reference. Not trimmed: a whitespace id is
/// looked up like any other and simply matches nothing.
pub fn required_category_id(raw: Option<&str>) -> Result<&str, CatalogError> {
    match raw {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(CatalogError::validation(CATEGORY_ID_REQUIRED)),
    }
}
