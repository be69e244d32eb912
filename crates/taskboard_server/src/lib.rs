//! HTTP surface for the task board backend.
//!
//! Routes JSON requests to `taskboard_core` services and maps their errors
//! onto HTTP statuses.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod server;

pub use api::AppState;
pub use config::ServerConfig;
pub use error::ApiError;
pub use server::{cors_layer, router, run, ServerError};
