use axum::Router;

pub mod categories;
pub mod items;
pub mod system;

/// Router for the catalog endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/categories", categories::router())
        .nest("/items", items::router())
}
