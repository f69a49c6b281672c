//! Account registration and credential verification.
//!
//! DESIGN
//! ======
//! Email + password auth. Registration creates the user row and an empty
//! profile row (username NULL) in one transaction; a NULL username is the
//! signal that onboarding is incomplete. Login failures never reveal
//! whether the email exists.

use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::services::password;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("password must be at least {0} characters")]
    WeakPassword(usize),
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("password hashing failed")]
    Hashing,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Normalize an email address: trim, lowercase, require one `@` with
/// non-empty local and domain parts.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

/// Register a new account and its empty profile row.
///
/// # Errors
///
/// `InvalidEmail` / `WeakPassword` on validation failure, `EmailTaken` on a
/// duplicate email, otherwise database errors.
pub async fn register_user(pool: &PgPool, email: &str, plain_password: &str) -> Result<Uuid, AuthError> {
    let normalized = normalize_email(email).ok_or(AuthError::InvalidEmail)?;
    if !password::acceptable_password(plain_password) {
        return Err(AuthError::WeakPassword(password::MIN_PASSWORD_LEN));
    }
    let password_hash = password::hash_password(plain_password).map_err(|_| AuthError::Hashing)?;

    let mut tx = pool.begin().await?;

    let row = sqlx::query(
        r"INSERT INTO users (email, password_hash)
          VALUES ($1, $2)
          ON CONFLICT (email) DO NOTHING
          RETURNING id",
    )
    .bind(&normalized)
    .bind(&password_hash)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
        return Err(AuthError::EmailTaken);
    };
    let user_id: Uuid = row.get("id");

    sqlx::query("INSERT INTO profiles (user_id) VALUES ($1)")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(user_id)
}

/// Verify credentials and return the user id.
///
/// # Errors
///
/// `InvalidCredentials` on an unknown email or wrong password; database
/// errors otherwise.
pub async fn authenticate(pool: &PgPool, email: &str, plain_password: &str) -> Result<Uuid, AuthError> {
    let normalized = normalize_email(email).ok_or(AuthError::InvalidCredentials)?;

    let row = sqlx::query("SELECT id, password_hash FROM users WHERE email = $1")
        .bind(&normalized)
        .fetch_optional(pool)
        .await?;

    let Some(row) = row else {
        return Err(AuthError::InvalidCredentials);
    };

    let stored: String = row.get("password_hash");
    let matches = password::verify_password(plain_password, &stored).map_err(|_| AuthError::Hashing)?;
    if !matches {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(row.get("id"))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
