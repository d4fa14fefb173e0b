//! Session cookie middleware.
//!
//! The middleware only classifies the presented cookie; it never rejects a
//! request. Handlers decide what each classification means, which keeps
//! cookie-less publish working and lets `GET /_session` accept any input.

use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderValue, Response};
use axum::middleware::Next;
use pantry_core::{SESSION_COOKIE, Session, SessionStatus};

/// Classification of the session cookie on a request.
#[derive(Clone, Debug)]
pub enum RequestSession {
    /// No `AuthSession` cookie was presented. Never fatal: anonymous
    /// publish is a supported path.
    Anonymous,
    /// The cookie identifies a live session.
    Valid(Session),
    /// The cookie was expired or never issued. Both provoke the same
    /// client-facing renewal flow.
    Stale,
}

impl RequestSession {
    /// Whether the request carried a cookie that is no longer usable.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// Extract the `AuthSession` value from a Cookie header.
///
/// Cookie headers are `name=value` pairs separated by `; `. npm sends a
/// single cookie, but parse defensively for proxies that merge headers.
fn extract_session_cookie(req: &Request) -> Option<String> {
    req.headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|header| {
            header.split(';').find_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                if name == SESSION_COOKIE && !value.is_empty() {
                    Some(value.to_string())
                } else {
                    None
                }
            })
        })
}

/// Middleware that classifies the session cookie and stores the result as a
/// request extension.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> axum::response::Response {
    let request_session = match extract_session_cookie(&req) {
        None => RequestSession::Anonymous,
        Some(token) => match state.sessions.validate(&token) {
            SessionStatus::Valid(session) => RequestSession::Valid(session),
            SessionStatus::Expired => {
                tracing::debug!("request carried an expired session cookie");
                RequestSession::Stale
            }
            SessionStatus::Unknown => {
                tracing::debug!("request carried an unknown session cookie");
                RequestSession::Stale
            }
        },
    };

    req.extensions_mut().insert(request_session);
    next.run(req).await
}

/// Get the session classification from request extensions.
///
/// Defaults to anonymous when the middleware did not run (unit tests that
/// call handlers directly).
pub fn request_session(req: &Request) -> RequestSession {
    req.extensions()
        .get::<RequestSession>()
        .cloned()
        .unwrap_or(RequestSession::Anonymous)
}

/// Attach the `AuthSession` cookie for a session to a response.
pub fn set_session_cookie<B>(response: &mut Response<B>, session: &Session, ttl_secs: u64) {
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; Max-Age={}",
        SESSION_COOKIE,
        session.token,
        ttl_secs
    );
    // Token and TTL are server-generated ASCII, always a valid header value
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
}
