//! ClientService: reads and writes against one database session.

use crate::error::AppError;
use crate::models::Client;
use crate::schemas::{ClientCreate, ClientUpdate};
use sqlx::PgConnection;

/// Repository bound to a single connection. Statements run in autocommit mode, so every
/// mutation is committed when the call returns.
pub struct ClientService<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> ClientService<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        ClientService { conn }
    }

    /// All clients, ascending by id.
    pub async fn get_all(&mut self) -> Result<Vec<Client>, AppError> {
        tracing::info!("fetching all clients");
        let rows = sqlx::query_as::<_, Client>("SELECT id, name, email FROM clients ORDER BY id ASC")
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&mut self, id: i32) -> Result<Option<Client>, AppError> {
        tracing::info!(client_id = id, "fetching client");
        let row = sqlx::query_as::<_, Client>("SELECT id, name, email FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row)
    }

    /// Insert one client. Returns the stored row with its assigned id.
    pub async fn create(&mut self, dto: ClientCreate) -> Result<Client, AppError> {
        tracing::info!(name = %dto.name, "creating client");
        let row = sqlx::query_as::<_, Client>(
            "INSERT INTO clients (name, email) VALUES ($1, $2) RETURNING id, name, email",
        )
        .bind(dto.name)
        .bind(dto.email)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(row)
    }

    /// Apply the fields present in `dto` in one statement; columns not in the payload are
    /// left to whatever the row holds when the update runs. Returns None when the client
    /// does not exist.
    pub async fn update(&mut self, id: i32, dto: ClientUpdate) -> Result<Option<Client>, AppError> {
        tracing::info!(client_id = id, "updating client");
        if dto.is_empty() {
            return self.get_by_id(id).await;
        }
        let name = dto.name.flatten();
        let (set_email, email) = match dto.email {
            Some(email) => (true, email),
            None => (false, None),
        };
        let row = sqlx::query_as::<_, Client>(
            "UPDATE clients \
             SET name = COALESCE($2, name), \
                 email = CASE WHEN $3 THEN $4 ELSE email END \
             WHERE id = $1 \
             RETURNING id, name, email",
        )
        .bind(id)
        .bind(name)
        .bind(set_email)
        .bind(email)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(row)
    }

    /// Remove one client. Returns false when there was nothing to delete.
    pub async fn delete(&mut self, id: i32) -> Result<bool, AppError> {
        tracing::info!(client_id = id, "deleting client");
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
