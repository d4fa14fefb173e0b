//! Session issuance, validation, and renewal.
//!
//! Sessions follow a single lifecycle: `Active --(TTL elapses)--> Expired
//! --(renew)--> Active(new token)`. Expiry is purely time-based; there is
//! no explicit logout or revocation.

use pantry_core::{Session, SessionStatus, SessionToken};
use parking_lot::RwLock;
use std::collections::HashMap;
use time::{Duration, OffsetDateTime};

/// Issues and tracks authentication sessions.
///
/// Depends on nothing but a clock. The table is guarded by a single
/// `RwLock`; no lock is held across an await.
pub struct SessionManager {
    ttl: Duration,
    sessions: RwLock<HashMap<SessionToken, Session>>,
}

impl SessionManager {
    /// Create a manager minting sessions with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// The configured session TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Mint a new session valid for the full TTL from now.
    pub fn create(&self) -> Session {
        let now = OffsetDateTime::now_utc();
        let session = Session {
            token: SessionToken::generate(),
            created_at: now,
            expires_at: now + self.ttl,
        };

        self.sessions
            .write()
            .insert(session.token.clone(), session.clone());

        tracing::debug!(expires_at = %session.expires_at, "session created");
        session
    }

    /// Classify a presented token: valid, expired, or never issued.
    ///
    /// An expired session is dropped from the table when observed; it can
    /// never be revived, only replaced via [`SessionManager::renew`].
    pub fn validate(&self, token: &str) -> SessionStatus {
        let key = SessionToken::new(token);
        let now = OffsetDateTime::now_utc();

        {
            let sessions = self.sessions.read();
            match sessions.get(&key) {
                Some(session) if session.is_valid_at(now) => {
                    return SessionStatus::Valid(session.clone());
                }
                Some(_) => {}
                None => return SessionStatus::Unknown,
            }
        }

        // Observed expired: drop the entry
        self.sessions.write().remove(&key);
        SessionStatus::Expired
    }

    /// Issue a fresh session in response to `GET /_session`.
    ///
    /// Always returns a session valid for the full TTL from the moment of
    /// renewal, regardless of whether the presented token was valid,
    /// expired, or absent. A presented token's old entry is replaced, not
    /// extended.
    pub fn renew(&self, presented: Option<&str>) -> Session {
        if let Some(token) = presented {
            let removed = self.sessions.write().remove(&SessionToken::new(token));
            if removed.is_some() {
                tracing::debug!("previous session replaced during renewal");
            }
        }
        self.create()
    }

    /// Insert a session whose TTL has already elapsed.
    ///
    /// Test-orchestration surface: lets a run start with a known-expired
    /// token so the renewal flow is reachable without waiting out a TTL.
    pub fn seed_expired(&self, token: &str) {
        let now = OffsetDateTime::now_utc();
        let session = Session {
            token: SessionToken::new(token),
            created_at: now - self.ttl - Duration::SECOND,
            expires_at: now - Duration::SECOND,
        };
        self.sessions.write().insert(session.token.clone(), session);
    }

    /// Number of tracked sessions, expired entries included until observed.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether no sessions are tracked.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
