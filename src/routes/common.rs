//! Probe routes: GET /heartbeat, GET /hello.

use crate::handlers::{heartbeat, hello};
use axum::{routing::get, Router};

pub fn common_routes() -> Router {
    Router::new()
        .route("/heartbeat", get(heartbeat))
        .route("/hello", get(hello))
}
