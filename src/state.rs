//! Shared application state for all routes.

use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};

/// Process-wide handle to the connection pool. Built once at startup by
/// [`crate::store::connect`], cloned into every handler by axum, and closed with
/// [`AppState::close`] after the server stops.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

/// One pooled connection. Returned to the pool when dropped.
pub type DbSession = PoolConnection<Postgres>;

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        AppState { pool }
    }

    /// Check out a connection for the current request.
    pub async fn session(&self) -> Result<DbSession, sqlx::Error> {
        self.pool.acquire().await
    }

    /// Wait for checked-out connections to return, then close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
