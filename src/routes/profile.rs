//! Profile routes — settings form and username availability.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::routes::auth::AuthUser;
use crate::services::profile::{self, Availability, Profile, ProfileError, ProfileUpdate};
use crate::state::AppState;

pub(crate) fn profile_error_to_status(err: &ProfileError) -> StatusCode {
    match err {
        ProfileError::NotFound(_) => StatusCode::NOT_FOUND,
        ProfileError::InvalidUsername => StatusCode::BAD_REQUEST,
        ProfileError::UsernameTaken => StatusCode::CONFLICT,
        ProfileError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_body(err: &ProfileError) -> (StatusCode, Json<serde_json::Value>) {
    (profile_error_to_status(err), Json(serde_json::json!({ "error": err.to_string() })))
}

/// `GET /api/profile` — return the caller's profile.
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Profile>, (StatusCode, Json<serde_json::Value>)> {
    let row = profile::fetch_profile(&state.pool, auth.user.id)
        .await
        .map_err(|e| error_body(&e))?;
    Ok(Json(row))
}

#[derive(Deserialize)]
pub struct UpdateProfileBody {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub website_url: Option<String>,
}

/// `PATCH /api/profile` — apply a partial profile update.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<UpdateProfileBody>,
) -> Result<Json<Profile>, (StatusCode, Json<serde_json::Value>)> {
    let update = ProfileUpdate {
        username: body.username,
        display_name: body.display_name,
        bio: body.bio,
        avatar_url: body.avatar_url,
        location: body.location,
        website_url: body.website_url,
    };

    let row = profile::update_profile(&state.pool, auth.user.id, update)
        .await
        .map_err(|e| error_body(&e))?;
    Ok(Json(row))
}

#[derive(Deserialize)]
pub struct UsernameCheckQuery {
    pub username: String,
}

/// `GET /api/profile/username-check?username=x` — availability lookup.
pub async fn username_check(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UsernameCheckQuery>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let availability: Availability = profile::username_availability(
        &state.pool,
        auth.user.id,
        &query.username,
        auth.user.username.as_deref(),
    )
    .await
    .map_err(|e| error_body(&e))?;

    Ok(Json(serde_json::json!({ "availability": availability })))
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
