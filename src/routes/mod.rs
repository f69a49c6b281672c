//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the JSON API under `/api`, the auth endpoints, the favicon proxy,
//! and read-only blob serving under `/uploads`. All handlers share one
//! `AppState`.

pub mod auth;
pub mod icons;
pub mod profile;
pub mod uploads;
pub mod widgets;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::services::storage::MAX_UPLOAD_BYTES;
use crate::state::AppState;

/// Headroom over the blob cap for multipart framing and the small
/// `replaces` field.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads_dir = ServeDir::new(state.storage.root());

    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/profile", get(profile::get_profile).patch(profile::update_profile))
        .route("/api/profile/username-check", get(profile::username_check))
        .route("/api/widgets", get(widgets::list_widgets).post(widgets::create_widget))
        .route("/api/widgets/reorder", post(widgets::reorder))
        .route(
            "/api/widgets/{id}",
            get(widgets::get_widget)
                .patch(widgets::update_widget)
                .delete(widgets::delete_widget),
        )
        .route(
            "/api/uploads",
            post(uploads::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/scrape-icon", get(icons::scrape_icon))
        .route("/healthz", get(healthz))
        .nest_service("/uploads", uploads_dir)
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
