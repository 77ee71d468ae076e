use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is internally reference-counted and the
/// config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: SqlitePool,
    /// Server configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
