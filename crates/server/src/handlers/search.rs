//! Search handler.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use pantry_registry::PackageSummary;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

/// Default page size when the client sends none.
const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound on page size, matching the public registry's cap.
const MAX_PAGE_SIZE: usize = 250;

/// Query parameters of `GET /-/v1/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Full-text query. Required.
    pub text: Option<String>,
    /// Page size.
    pub size: Option<usize>,
    /// Pagination offset.
    pub from: Option<usize>,
}

/// Response shape of `/-/v1/search`, as the npm formatter consumes it.
///
/// An empty `objects` array renders client-side as the no-match phrase;
/// the server only supplies the data, never the wording.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub objects: Vec<SearchObject>,
    pub total: usize,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct SearchObject {
    pub package: SearchPackage,
    pub score: SearchScore,
    #[serde(rename = "searchScore")]
    pub search_score: f64,
}

#[derive(Debug, Serialize)]
pub struct SearchPackage {
    pub name: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct SearchScore {
    #[serde(rename = "final")]
    pub final_score: f64,
    pub detail: SearchScoreDetail,
}

#[derive(Debug, Serialize)]
pub struct SearchScoreDetail {
    pub quality: f64,
    pub popularity: f64,
    pub maintenance: f64,
}

fn search_object(summary: PackageSummary) -> SearchObject {
    let date = summary
        .date
        .format(&Rfc3339)
        .unwrap_or_else(|_| summary.date.to_string());

    SearchObject {
        package: SearchPackage {
            name: summary.name,
            version: summary.version,
            description: summary.description,
            date,
        },
        // The registry has no download stats to score by; every match
        // ranks equally and ordering stays name-based.
        score: SearchScore {
            final_score: 1.0,
            detail: SearchScoreDetail {
                quality: 1.0,
                popularity: 1.0,
                maintenance: 1.0,
            },
        },
        search_score: 1.0,
    }
}

/// GET /-/v1/search - Search published packages by name.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<SearchResponse>> {
    let text = params
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing required query parameter: text".to_string()))?;

    let size = params.size.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let from = params.from.unwrap_or(0);

    let matches = state.store.search(text);
    let total = matches.len();

    let objects: Vec<SearchObject> = matches
        .into_iter()
        .skip(from)
        .take(size)
        .map(search_object)
        .collect();

    let time = time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| ApiError::Internal(format!("failed to format timestamp: {e}")))?;

    Ok(Json(SearchResponse {
        objects,
        total,
        time,
    }))
}
