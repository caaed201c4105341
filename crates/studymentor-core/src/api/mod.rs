//! Remote study-mentor API: wire types and the async client.

pub mod client;
pub mod types;

pub use client::ApiClient;
