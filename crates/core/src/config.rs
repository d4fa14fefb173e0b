//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use time::Duration;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:4873").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Per-request timeout in seconds. A stuck client cannot hold a
    /// connection open past this bound.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Enable verbose request tracing.
    #[serde(default)]
    pub enable_tracing: bool,
}

fn default_bind() -> String {
    "127.0.0.1:4873".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            request_timeout_secs: default_request_timeout_secs(),
            enable_tracing: false,
        }
    }
}

impl ServerConfig {
    /// Get the request timeout as a std Duration.
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate server configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_secs == 0 {
            return Err("server.request_timeout_secs cannot be 0".to_string());
        }
        Ok(())
    }
}

/// Session configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session time-to-live in seconds. Sessions past this age are expired
    /// and must be renewed via `GET /_session`.
    #[serde(default = "default_session_ttl_secs")]
    pub ttl_secs: u64,
    /// Pre-seed a token that is already expired at startup. Used by test
    /// orchestration to exercise the renewal flow; never exposed as a
    /// runtime endpoint.
    #[serde(default)]
    pub seed_expired_token: Option<String>,
}

fn default_session_ttl_secs() -> u64 {
    3600
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl_secs(),
            seed_expired_token: None,
        }
    }
}

impl SessionConfig {
    /// Get the session TTL as a Duration.
    pub fn ttl(&self) -> Duration {
        // Saturate at i64::MAX to prevent overflow wrapping to negative
        let secs = i64::try_from(self.ttl_secs).unwrap_or(i64::MAX);
        Duration::seconds(secs)
    }

    /// Validate session configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.ttl_secs == 0 {
            return Err(
                "session.ttl_secs cannot be 0 (every session would be born expired)".to_string(),
            );
        }
        if self.ttl_secs > i64::MAX as u64 {
            return Err(format!(
                "session.ttl_secs {} exceeds maximum value {} (would overflow Duration)",
                self.ttl_secs,
                i64::MAX
            ));
        }
        Ok(())
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Create a test configuration with sensible defaults.
    ///
    /// **For testing only.** Binds to an ephemeral port and uses a short
    /// session TTL so expiry is reachable in tests.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig {
                bind: "127.0.0.1:0".to_string(),
                ..Default::default()
            },
            session: SessionConfig {
                ttl_secs: 60,
                seed_expired_token: None,
            },
        }
    }

    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.session.validate()?;
        Ok(())
    }
}
