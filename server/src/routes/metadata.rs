//! Link metadata route.
//!
//! The one hard contract here: a syntactically valid `url` always gets a
//! 200 with something renderable — upstream failures degrade inside the
//! resolver and never surface as a 5xx. Only a missing or unparseable `url`
//! parameter is the caller's error.

#[cfg(test)]
#[path = "metadata_test.rs"]
mod metadata_test;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use url::Url;

use crate::services::metadata::{self, MetadataResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MetadataQuery {
    pub url: Option<String>,
}

/// `GET /api/metadata?url=...` — scrape best-effort link metadata.
pub async fn fetch_metadata(
    State(state): State<AppState>,
    Query(query): Query<MetadataQuery>,
) -> Result<Json<MetadataResult>, (StatusCode, Json<serde_json::Value>)> {
    let url = parse_url_param(query.url.as_deref()).map_err(|message| {
        (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": message })))
    })?;

    Ok(Json(metadata::resolve(&state.http, &url).await))
}

/// Validate the `url` query parameter. The resolver assumes a syntactically
/// valid absolute URL, so rejection happens here, before it runs.
pub(crate) fn parse_url_param(raw: Option<&str>) -> Result<Url, &'static str> {
    let raw = raw.ok_or("URL is required")?;
    Url::parse(raw).map_err(|_| "URL must be a valid absolute URL")
}
