//! Profile service: fetch/update and username availability.
//!
//! DESIGN
//! ======
//! One profile row per user, created empty at registration. Usernames are
//! globally unique; the availability check is advisory (the update re-checks
//! under the unique constraint), and a candidate equal to the caller's own
//! current username never touches the database.

use serde::Serialize;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub const MAX_USERNAME_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("profile not found for user {0}")]
    NotFound(Uuid),
    #[error("invalid username")]
    InvalidUsername,
    #[error("username taken")]
    UsernameTaken,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One profile row. Mirrors the `profiles` table.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub user_id: Uuid,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub website_url: Option<String>,
    pub role: Option<String>,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Default, Clone)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub website_url: Option<String>,
}

/// Username availability as seen by the caller. The in-flight "unknown"
/// state lives client-side; the server always answers definitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Taken,
}

/// Normalize a candidate username: lowercase, `[a-z0-9_]` only, bounded
/// length. Anything else is rejected rather than silently rewritten.
#[must_use]
pub fn normalize_username(candidate: &str) -> Option<String> {
    let normalized = candidate.trim().to_ascii_lowercase();
    if normalized.is_empty() || normalized.len() > MAX_USERNAME_LEN {
        return None;
    }
    if !normalized.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        return None;
    }
    Some(normalized)
}

fn row_to_profile(r: &sqlx::postgres::PgRow) -> Profile {
    Profile {
        user_id: r.get("user_id"),
        username: r.get("username"),
        display_name: r.get("display_name"),
        bio: r.get("bio"),
        avatar_url: r.get("avatar_url"),
        location: r.get("location"),
        website_url: r.get("website_url"),
        role: r.get("role"),
    }
}

/// Fetch the caller's profile.
///
/// # Errors
///
/// `NotFound` if the row is missing, database errors otherwise.
pub async fn fetch_profile(pool: &PgPool, user_id: Uuid) -> Result<Profile, ProfileError> {
    let row = sqlx::query(
        r"SELECT user_id, username, display_name, bio, avatar_url, location, website_url, role
          FROM profiles WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(ProfileError::NotFound(user_id))?;

    Ok(row_to_profile(&row))
}

/// Apply a partial profile update and return the new row.
///
/// # Errors
///
/// `InvalidUsername` for a malformed candidate, `UsernameTaken` when the
/// unique constraint rejects it, `NotFound` if the profile row is missing.
pub async fn update_profile(pool: &PgPool, user_id: Uuid, update: ProfileUpdate) -> Result<Profile, ProfileError> {
    let username = match update.username.as_deref() {
        Some(candidate) => Some(normalize_username(candidate).ok_or(ProfileError::InvalidUsername)?),
        None => None,
    };

    let row = sqlx::query(
        r"UPDATE profiles SET
              username = COALESCE($2, username),
              display_name = COALESCE($3, display_name),
              bio = COALESCE($4, bio),
              avatar_url = COALESCE($5, avatar_url),
              location = COALESCE($6, location),
              website_url = COALESCE($7, website_url),
              updated_at = now()
          WHERE user_id = $1
          RETURNING user_id, username, display_name, bio, avatar_url, location, website_url, role",
    )
    .bind(user_id)
    .bind(username)
    .bind(update.display_name)
    .bind(update.bio)
    .bind(update.avatar_url)
    .bind(update.location)
    .bind(update.website_url)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return ProfileError::UsernameTaken;
            }
        }
        ProfileError::Database(e)
    })?
    .ok_or(ProfileError::NotFound(user_id))?;

    Ok(row_to_profile(&row))
}

/// Check whether `candidate` is free for `user_id` to claim.
///
/// A candidate equal to the caller's current username short-circuits to
/// `Available` without issuing the existence query.
///
/// # Errors
///
/// `InvalidUsername` for a malformed candidate, database errors otherwise.
pub async fn username_availability(
    pool: &PgPool,
    user_id: Uuid,
    candidate: &str,
    current_username: Option<&str>,
) -> Result<Availability, ProfileError> {
    let normalized = normalize_username(candidate).ok_or(ProfileError::InvalidUsername)?;

    if current_username == Some(normalized.as_str()) {
        return Ok(Availability::Available);
    }

    let taken = sqlx::query("SELECT 1 AS present FROM profiles WHERE username = $1 AND user_id <> $2")
        .bind(&normalized)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .is_some();

    Ok(if taken { Availability::Taken } else { Availability::Available })
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
