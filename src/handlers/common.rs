//! Liveness and greeting endpoints. Neither touches the database.

use crate::error::AppError;
use crate::schemas::HelloParams;
use axum::{
    extract::{rejection::QueryRejection, Query},
    http::StatusCode,
};

/// Liveness probe: 200 with an empty body.
pub async fn heartbeat() -> StatusCode {
    StatusCode::OK
}

pub async fn hello(params: Result<Query<HelloParams>, QueryRejection>) -> Result<String, AppError> {
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;
    Ok(format!("Hello dear {}!", params.name))
}
