//! Application state shared across handlers.
//!
//! The store and session table are owned by the server instance and passed
//! by handle into request handlers; there are no ambient globals. Each test
//! run constructs a fresh instance to guarantee isolation.

use pantry_core::config::AppConfig;
use pantry_registry::{PackageStore, SessionManager};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// In-memory package catalog.
    pub store: Arc<PackageStore>,
    /// Session manager.
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Validates the configuration and seeds the pre-expired token when one
    /// is configured.
    ///
    /// # Panics
    ///
    /// Panics if configuration validation fails.
    pub fn new(config: AppConfig) -> Self {
        if let Err(error) = config.validate() {
            panic!("Invalid configuration: {}", error);
        }

        let sessions = SessionManager::new(config.session.ttl());
        if let Some(token) = &config.session.seed_expired_token {
            sessions.seed_expired(token);
            tracing::info!("Seeded pre-expired session token");
        }

        Self {
            config: Arc::new(config),
            store: Arc::new(PackageStore::new()),
            sessions: Arc::new(sessions),
        }
    }
}
