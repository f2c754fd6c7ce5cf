//! Client CRUD handlers. Each handler that reads or writes checks out one pooled
//! connection after the request has been validated; it goes back to the pool on drop.

use crate::error::AppError;
use crate::extractors::{PathId, ValidJson};
use crate::schemas::{ClientCreate, ClientUpdate, ClientView};
use crate::service::ClientService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Client {} not found", id))
}

/// Ids that do not fit the `SERIAL` column cannot name a stored client.
fn client_key(id: i64) -> Result<i32, AppError> {
    i32::try_from(id).map_err(|_| not_found(id))
}

pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<ClientView>>, AppError> {
    let mut session = state.session().await?;
    let clients = ClientService::new(&mut session).get_all().await?;
    Ok(Json(clients.into_iter().map(ClientView::from).collect()))
}

pub async fn get_client(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<ClientView>, AppError> {
    let key = client_key(id)?;
    let mut session = state.session().await?;
    let client = ClientService::new(&mut session)
        .get_by_id(key)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(client.into()))
}

pub async fn create_client(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<ClientCreate>,
) -> Result<(StatusCode, Json<ClientView>), AppError> {
    let mut session = state.session().await?;
    let client = ClientService::new(&mut session).create(body).await?;
    Ok((StatusCode::CREATED, Json(client.into())))
}

pub async fn update_client(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidJson(body): ValidJson<ClientUpdate>,
) -> Result<Json<ClientView>, AppError> {
    let key = client_key(id)?;
    let mut session = state.session().await?;
    let client = ClientService::new(&mut session)
        .update(key, body)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(client.into()))
}

pub async fn delete_client(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<StatusCode, AppError> {
    let key = client_key(id)?;
    let mut session = state.session().await?;
    if !ClientService::new(&mut session).delete(key).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_outside_column_range_are_not_found() {
        assert_eq!(client_key(42).unwrap(), 42);
        assert_eq!(client_key(i32::MAX as i64).unwrap(), i32::MAX);
        let err = client_key(3_000_000_000).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "Client 3000000000 not found");
        assert!(matches!(client_key(-3_000_000_000), Err(AppError::NotFound(_))));
    }
}
