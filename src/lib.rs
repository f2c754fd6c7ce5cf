//! Clients API: REST CRUD over a single `clients` table in PostgreSQL.

pub mod config;
pub mod connection;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod schemas;
pub mod service;
pub mod state;
pub mod store;

pub use config::{PoolSettings, Settings};
pub use connection::resolve_connection_string;
pub use error::{AppError, ConfigError};
pub use routes::app;
pub use service::ClientService;
pub use state::AppState;
pub use store::{connect, connect_options, connect_with, ensure_database_exists, ensure_tables};
