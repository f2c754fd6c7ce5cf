//! Client CRUD routes.

use crate::handlers::{create_client, delete_client, get_client, list_clients, update_client};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn client_routes(state: AppState) -> Router {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
        .with_state(state)
}
