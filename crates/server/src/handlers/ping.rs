//! Liveness endpoint.

use axum::Json;
use serde_json::{Value, json};

/// GET /-/ping - Registry liveness, intentionally unauthenticated.
/// The public registry answers with an empty JSON object.
pub async fn ping() -> Json<Value> {
    Json(json!({}))
}
