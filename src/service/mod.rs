//! Data access for the clients table.

mod client;
pub use client::ClientService;
