use axum::http::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use stockroom_inventory::{CreateItemInput, ItemFilter};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
}

/// `quantity` stays untyped here so a non-numeric value reaches the rules as
/// "absent" and is reported with the quantity message, not a decode error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub quantity: Option<serde_json::Value>,
    pub category_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItemsQuery {
    pub category_id: Option<String>,
}

impl From<CreateItemRequest> for CreateItemInput {
    fn from(body: CreateItemRequest) -> Self {
        CreateItemInput {
            name: body.name,
            quantity: body.quantity.as_ref().and_then(serde_json::Value::as_f64),
            category_id: body.category_id,
        }
    }
}

impl From<ListItemsQuery> for ItemFilter {
    fn from(query: ListItemsQuery) -> Self {
        ItemFilter {
            category_id: query.category_id,
        }
    }
}

// -------------------------
// Body decoding
// -------------------------

/// Decode a JSON request body. An empty body or `null` decodes to the
/// request's default (every field absent).
pub fn decode_json_body<T>(body: &[u8]) -> Result<T, axum::response::Response>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice::<Option<T>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, format!("invalid JSON body: {e}")))
}
