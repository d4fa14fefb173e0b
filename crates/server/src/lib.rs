//! HTTP surface of the Pantry registry.
//!
//! This crate provides the npm-compatible control plane:
//! - Package publish (`PUT /{package-name}`)
//! - Packument retrieval (`GET /{package-name}`)
//! - Search (`GET /-/v1/search`)
//! - Session renewal (`GET /_session`)
//! - Liveness (`GET /-/ping`)

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use auth::RequestSession;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
