//! Package publish handler.

use crate::auth::request_session;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::body::to_bytes;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use pantry_core::PublishDocument;
use serde::Serialize;
use uuid::Uuid;

/// Maximum request body size for publish requests (16 MiB).
///
/// The publish document inlines the tarball as a base64 attachment, so the
/// bound must leave room for real packages while still rejecting runaway
/// bodies before they are buffered.
const MAX_PUBLISH_BODY_SIZE: usize = 16 * 1024 * 1024;

/// Response for an accepted publish.
///
/// The npm client prints `+ name@version` from a 2xx response; `id` and the
/// accepted version are the fields it needs echoed back.
#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub ok: bool,
    pub id: String,
    pub rev: String,
    pub version: String,
}

/// PUT /{package-name} - Publish a package version.
///
/// A request with no session cookie proceeds: the store enforces no
/// authentication. A stale (expired or unknown) cookie yields 401, which
/// sends the client through `GET /_session` and a retry.
pub async fn publish_package(
    State(state): State<AppState>,
    Path(package_name): Path<String>,
    req: Request,
) -> ApiResult<(StatusCode, Json<PublishResponse>)> {
    if request_session(&req).is_stale() {
        return Err(ApiError::Unauthorized(
            "session expired, renew via GET /_session".to_string(),
        ));
    }

    let body = to_bytes(req.into_body(), MAX_PUBLISH_BODY_SIZE)
        .await
        .map_err(|e| ApiError::BadRequest(format!("failed to read publish body: {e}")))?;

    let document: PublishDocument = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("malformed publish document: {e}")))?;

    let (name, version) = document.validate(&package_name)?;
    let metadata = document
        .version_metadata()
        .cloned()
        .ok_or_else(|| ApiError::BadRequest("document contains no versions".to_string()))?;

    let published = state.store.publish(&name, &version, metadata)?;

    Ok((
        StatusCode::CREATED,
        Json(PublishResponse {
            ok: true,
            id: published.name,
            rev: format!("1-{}", Uuid::new_v4().simple()),
            version: published.version,
        }),
    ))
}
