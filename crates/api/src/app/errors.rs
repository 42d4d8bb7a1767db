use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_core::DomainError;
use stockroom_inventory::CatalogError;

pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    match err {
        CatalogError::Domain(DomainError::Validation(msg)) => json_error(StatusCode::BAD_REQUEST, msg),
        CatalogError::Domain(DomainError::NotFound(msg)) => json_error(StatusCode::NOT_FOUND, msg),
        CatalogError::Domain(DomainError::Conflict(msg)) => json_error(StatusCode::CONFLICT, msg),
        CatalogError::Store(e) => {
            tracing::error!(error = %e, "unhandled storage failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
        })),
    )
        .into_response()
}
