use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A portfolio project shown on the public site.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Stored attachment reference under the upload directory, if any.
    pub image_filename: Option<String>,
    pub created_at: DateTime<Utc>,
}
