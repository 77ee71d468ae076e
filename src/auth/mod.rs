//! Credential checks and the signed session token.
//!
//! The session marker is a short-lived JWT carried in an `HttpOnly` cookie.
//! It references the authenticated admin identity; every guarded request
//! validates it and turns it into an explicit context value (see
//! `middleware::auth`) instead of ambient session state.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::database::models::AdminUser;

pub mod password;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Admin user id.
    pub sub: i64,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionTokenError {
    #[error("session token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Issue a session token for an authenticated admin.
pub fn issue_session_token(
    admin: &AdminUser,
    secret: &str,
    expiry_hours: i64,
) -> Result<String, SessionTokenError> {
    let now = Utc::now();
    let claims = Claims {
        sub: admin.id,
        username: admin.username.clone(),
        exp: (now + Duration::hours(expiry_hours)).timestamp(),
        iat: now.timestamp(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Validate a session token and return its claims.
pub fn validate_session_token(token: &str, secret: &str) -> Result<Claims, SessionTokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Check a username/password pair against the credential store.
///
/// Returns `Ok(None)` for an unknown username and for a wrong password
/// alike, so callers surface one generic failure message. A stored hash
/// that cannot be parsed is treated as a failed match and logged.
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<AdminUser>, sqlx::Error> {
    let admin = sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    let Some(admin) = admin else {
        return Ok(None);
    };

    match password::verify_password(password, &admin.password_hash) {
        Ok(true) => Ok(Some(admin)),
        Ok(false) => Ok(None),
        Err(e) => {
            tracing::warn!(username = %admin.username, "Stored password hash rejected: {}", e);
            Ok(None)
        }
    }
}
