//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: storage gateway selection and rules construction
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs and JSON body decoding
//! - `errors.rs`: consistent `{"error": ...}` responses

use std::future::Future;
use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: Arc<AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(Extension(services)),
        )
}

/// Serve the router on `listener` until `shutdown` resolves. Storage is
/// released afterwards even when serving stopped on an error.
pub async fn serve<F>(
    listener: tokio::net::TcpListener,
    services: Arc<AppServices>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let served = axum::serve(listener, build_app(services.clone()))
        .with_graceful_shutdown(shutdown)
        .await;

    services.shutdown().await;
    served
}
