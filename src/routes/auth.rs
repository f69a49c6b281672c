//! Auth routes — registration, login, session management.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::services::{auth as auth_svc, session};
use crate::state::AppState;

const COOKIE_NAME: &str = "session_token";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("PUBLIC_BASE_URL")
        .map(|base| base.starts_with("https://"))
        .unwrap_or(false)
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .build()
}

fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: session::SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

pub(crate) fn auth_error_to_status(err: &auth_svc::AuthError) -> StatusCode {
    match err {
        auth_svc::AuthError::InvalidEmail | auth_svc::AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
        auth_svc::AuthError::EmailTaken => StatusCode::CONFLICT,
        auth_svc::AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        auth_svc::AuthError::Hashing | auth_svc::AuthError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct CredentialsBody {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/register` — create an account, set the session cookie.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<(StatusCode, CookieJar, Json<session::SessionUser>), (StatusCode, Json<serde_json::Value>)> {
    let user_id = auth_svc::register_user(&state.pool, &body.email, &body.password)
        .await
        .map_err(|e| (auth_error_to_status(&e), Json(serde_json::json!({ "error": e.to_string() }))))?;

    let token = session::create_session(&state.pool, user_id)
        .await
        .map_err(internal_error)?;
    let user = session::validate_session(&state.pool, &token)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| internal_error(sqlx::Error::RowNotFound))?;

    let jar = CookieJar::new().add(session_cookie(token));
    Ok((StatusCode::CREATED, jar, Json(user)))
}

/// `POST /api/auth/login` — verify credentials, rotate a fresh session.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> Result<(CookieJar, Json<session::SessionUser>), (StatusCode, Json<serde_json::Value>)> {
    let user_id = auth_svc::authenticate(&state.pool, &body.email, &body.password)
        .await
        .map_err(|e| (auth_error_to_status(&e), Json(serde_json::json!({ "error": e.to_string() }))))?;

    let token = session::create_session(&state.pool, user_id)
        .await
        .map_err(internal_error)?;
    let user = session::validate_session(&state.pool, &token)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| internal_error(sqlx::Error::RowNotFound))?;

    let jar = CookieJar::new().add(session_cookie(token));
    Ok((jar, Json(user)))
}

fn internal_error(e: sqlx::Error) -> (StatusCode, Json<serde_json::Value>) {
    tracing::error!(error = %e, "auth handler database failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "internal error" })),
    )
}

/// `GET /api/auth/me` — return the current user.
pub async fn me(auth: AuthUser) -> Json<session::SessionUser> {
    Json(auth.user)
}

/// `POST /api/auth/logout` — delete the session, clear the cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let _ = session::delete_session(&state.pool, &auth.token).await;

    let jar = CookieJar::new().add(clear_session_cookie());
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
