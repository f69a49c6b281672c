//! Favicon lookup proxy.
//!
//! Derives the icon lookup URL for an arbitrary destination URL; nothing
//! is fetched server-side.

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::services::favicon;

#[derive(Deserialize)]
pub struct ScrapeIconQuery {
    pub url: Option<String>,
}

/// `GET /api/scrape-icon?url=...` — `{"iconUrl": ...}` or a 400 with an
/// error body for a missing or unparseable URL.
pub async fn scrape_icon(
    Query(query): Query<ScrapeIconQuery>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let Some(target) = query.url.filter(|u| !u.is_empty()) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "URL is required" })),
        ));
    };

    match favicon::derive_icon_url(&target) {
        Some(icon_url) => Ok(Json(serde_json::json!({ "iconUrl": icon_url }))),
        None => Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Invalid URL" })),
        )),
    }
}

#[cfg(test)]
#[path = "icons_test.rs"]
mod tests;
