//! Router assembly. Everything is served under `/api`.

mod client;
mod common;

pub use client::client_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Full application router with request tracing and a body size limit.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(common_routes())
        .merge(client_routes(state));
    Router::new()
        .nest("/api", api)
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}
