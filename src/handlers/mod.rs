//! HTTP handlers for client CRUD and service probes.

pub mod client;
pub mod common;
pub use client::*;
pub use common::*;
