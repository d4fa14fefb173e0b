//! Session renewal handler.

use crate::auth::{RequestSession, request_session, set_session_cookie};
use crate::error::ApiResult;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// CouchDB-style session acknowledgment.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub ok: bool,
    #[serde(rename = "userCtx")]
    pub user_ctx: UserContext,
}

#[derive(Debug, Serialize)]
pub struct UserContext {
    pub name: Option<String>,
    pub roles: Vec<String>,
}

/// GET /_session - Mint or renew the `AuthSession` cookie.
///
/// Always 200 with a fresh session valid for the full TTL, whether the
/// presented cookie was valid, expired, unknown, or absent. This is the
/// renewal leg of the client's 401-retry flow.
pub async fn get_session(State(state): State<AppState>, req: Request) -> ApiResult<Response> {
    // A still-valid token is replaced; stale and absent cookies have no
    // entry left to replace (expired entries are dropped on observation).
    let session = match request_session(&req) {
        RequestSession::Valid(current) => state.sessions.renew(Some(current.token.as_str())),
        RequestSession::Stale | RequestSession::Anonymous => state.sessions.renew(None),
    };

    tracing::debug!(expires_at = %session.expires_at, "session renewed");

    let body = SessionResponse {
        ok: true,
        user_ctx: UserContext {
            name: None,
            roles: Vec::new(),
        },
    };

    let mut response = Json(body).into_response();
    set_session_cookie(&mut response, &session, state.config.session.ttl_secs);
    Ok(response)
}
