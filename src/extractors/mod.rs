//! Request extractors that reject with [`crate::error::AppError`].

pub mod id;
pub mod json;

pub use id::PathId;
pub use json::ValidJson;
