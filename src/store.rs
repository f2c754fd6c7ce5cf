//! Database bootstrap: resolve the connection descriptor, create the database when it is
//! missing, build the pool and make sure the `clients` table exists.

use crate::config::PoolSettings;
use crate::connection::resolve_connection_string;
use crate::error::{AppError, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, Connection, PgPool};
use std::str::FromStr;
use std::time::Duration;

/// Administrative database used to run CREATE DATABASE.
const ADMIN_DATABASE: &str = "postgres";

/// SQLSTATE `invalid_catalog_name`, raised when connecting to a database that does not exist.
const INVALID_CATALOG_NAME: &str = "3D000";

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

const CLIENTS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS clients (
        id SERIAL PRIMARY KEY,
        name VARCHAR(200) NOT NULL,
        email VARCHAR(320)
    )
"#;

/// Resolve `descriptor`, ensure the database exists, and return a ready pool with the
/// schema in place. The pool pings connections before handing them out.
pub async fn connect(descriptor: &str, settings: &PoolSettings) -> Result<PgPool, AppError> {
    connect_with(connect_options(descriptor)?, settings).await
}

/// Same as [`connect`], for options that are already parsed.
pub async fn connect_with(opts: PgConnectOptions, settings: &PoolSettings) -> Result<PgPool, AppError> {
    ensure_database_exists(&opts).await?;
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .test_before_acquire(true)
        .connect_with(opts)
        .await?;
    ensure_tables(&pool).await?;
    Ok(pool)
}

/// Parse a connection descriptor (URL or `key=value;` form) into connect options.
pub fn connect_options(descriptor: &str) -> Result<PgConnectOptions, AppError> {
    let url = resolve_connection_string(descriptor);
    PgConnectOptions::from_str(&url)
        .map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()).into())
}

/// Try the target database; if the server reports it missing, create it through the
/// admin database. Any other connection failure is returned as-is.
pub async fn ensure_database_exists(opts: &PgConnectOptions) -> Result<(), AppError> {
    match opts.connect().await {
        Ok(conn) => {
            conn.close().await?;
            Ok(())
        }
        Err(e) if is_missing_database(&e) => create_database(opts).await,
        Err(e) => Err(AppError::Db(e)),
    }
}

async fn create_database(opts: &PgConnectOptions) -> Result<(), AppError> {
    let Some(db_name) = opts.get_database().map(str::to_string) else {
        return Ok(());
    };
    if db_name.is_empty() || db_name == ADMIN_DATABASE {
        return Ok(());
    }
    let mut conn = opts.clone().database(ADMIN_DATABASE).connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    conn.close().await?;
    Ok(())
}

/// Create-if-absent DDL for every table the service uses.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(CLIENTS_DDL).execute(pool).await?;
    Ok(())
}

/// Whether a connect error means the target database is absent. Uses the SQLSTATE when the
/// server sent one, and falls back to matching the error text.
pub fn is_missing_database(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some(INVALID_CATALOG_NAME) {
            return true;
        }
    }
    message_indicates_missing_database(&err.to_string())
}

fn message_indicates_missing_database(message: &str) -> bool {
    message.to_lowercase().contains("does not exist")
}

pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
