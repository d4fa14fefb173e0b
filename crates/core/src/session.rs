//! Session tokens and expiry.

use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// An opaque session token, carried in the `AuthSession` cookie.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a new random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wrap an existing token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({})", self.0)
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An authentication session with a fixed TTL from creation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// The opaque token identifying this session.
    pub token: SessionToken,
    /// When the session was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the session expires. Fixed at creation; expired sessions are
    /// never revived.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl Session {
    /// Check whether the session is valid at the given instant.
    pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
        now < self.expires_at
    }

    /// Check whether the session is valid right now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(OffsetDateTime::now_utc())
    }

    /// Time remaining until expiry at the given instant. Negative once
    /// expired.
    pub fn remaining(&self, now: OffsetDateTime) -> Duration {
        self.expires_at - now
    }
}

/// Three-way result of validating a presented token.
///
/// Unknown tokens (never issued) are distinct from expired ones, though
/// both provoke the same client-facing renewal flow.
#[derive(Clone, Debug)]
pub enum SessionStatus {
    /// The token identifies a live session.
    Valid(Session),
    /// The token was issued but its TTL has elapsed.
    Expired,
    /// The token was never issued by this server.
    Unknown,
}

impl SessionStatus {
    /// Whether the status represents a live session.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}
