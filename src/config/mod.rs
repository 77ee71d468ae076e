use std::path::PathBuf;

/// Application configuration loaded from environment variables.
///
/// Every field has a development-friendly default; production deployments
/// override via env. The config is carried inside [`crate::state::AppState`]
/// rather than a process-wide singleton so tests can build isolated
/// instances with their own upload directory and database.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address (default `0.0.0.0`).
    pub host: String,
    /// Bind port (default `5000`).
    pub port: u16,
    /// SQLite database URL (default `sqlite:studio.db?mode=rwc`).
    pub database_url: String,
    /// Directory where uploaded attachments are written.
    pub upload_dir: PathBuf,
    /// Secret used to sign session tokens.
    pub session_secret: String,
    /// Session token lifetime in hours.
    pub session_expiry_hours: i64,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// | Env var                 | Default                     |
    /// |-------------------------|-----------------------------|
    /// | `HOST`                  | `0.0.0.0`                   |
    /// | `PORT`                  | `5000`                      |
    /// | `DATABASE_URL`          | `sqlite:studio.db?mode=rwc` |
    /// | `UPLOAD_DIR`            | `static/uploads`            |
    /// | `SECRET_KEY`            | `dev-secret-key`            |
    /// | `SESSION_EXPIRY_HOURS`  | `12`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(5000);

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:studio.db?mode=rwc".into());

        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static/uploads"));

        let session_secret =
            std::env::var("SECRET_KEY").unwrap_or_else(|_| "dev-secret-key".into());

        let session_expiry_hours = std::env::var("SESSION_EXPIRY_HOURS")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(12);

        Self {
            host,
            port,
            database_url,
            upload_dir,
            session_secret,
            session_expiry_hours,
        }
    }
}
