//! Packument retrieval handler.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use pantry_core::PackageName;
use pantry_registry::Packument;

/// GET /{package-name} - Full metadata document for a published package.
///
/// Names that cannot exist in the catalog (invalid identifiers) are
/// reported the same as names that were never published.
pub async fn get_packument(
    State(state): State<AppState>,
    Path(package_name): Path<String>,
) -> ApiResult<Json<Packument>> {
    let name = PackageName::parse(&package_name)
        .map_err(|_| ApiError::NotFound(format!("package not found: {package_name}")))?;

    state
        .store
        .packument(&name)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("package not found: {package_name}")))
}
