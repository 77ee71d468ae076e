use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

pub mod models;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Open the SQLite pool, creating the database file if it does not exist.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    SqlitePoolOptions::new().connect_with(options).await
}

/// Apply embedded migrations from `migrations/`.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Pings the database to ensure connectivity
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create a default admin identity when the credential store is empty.
///
/// Returns `true` when an admin was created. Existing admins are never
/// touched, so calling this on every startup is safe. The caller decides
/// the username/password (typically `ADMIN_USER`/`ADMIN_PASS` env vars
/// falling back to `admin`/`admin`).
pub async fn bootstrap_admin(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<bool, BootstrapError> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(false);
    }

    let hashed = crate::auth::password::hash_password(password)
        .map_err(|e| BootstrapError::Hashing(e.to_string()))?;

    sqlx::query("INSERT INTO admin_users (username, password_hash, created_at) VALUES (?, ?, ?)")
        .bind(username)
        .bind(&hashed)
        .bind(chrono::Utc::now())
        .execute(pool)
        .await?;

    tracing::warn!(
        "No admin found - created default admin \"{}\". \
         Change the password (ADMIN_PASS) before exposing this instance.",
        username
    );
    Ok(true)
}
