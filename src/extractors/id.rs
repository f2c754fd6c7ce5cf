//! Integer id from the last path segment.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Entity id parsed from `/:id`. A non-integer segment is a validation error (422). The
/// value is kept as `i64` so that well-formed ids outside the key column's range can be
/// reported as not found by the handler.
#[derive(Clone, Copy, Debug)]
pub struct PathId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        Ok(PathId(id))
    }
}
