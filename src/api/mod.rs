//! Arena HTTP API integration.
//!
//! A thin async client over the arena's REST endpoints. Responses are kept as
//! `serde_json::Value` because their shape is owned by the server; only the
//! handful of fields the workflows branch on are read through helpers in
//! `types`.

pub mod client;
pub mod error;
pub mod types;

pub use client::ArenaClient;
pub use error::ApiError;
