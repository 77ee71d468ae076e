use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A consultation request submitted through the public contact form.
///
/// Write-once: there are no update or delete routes, the records act as an
/// inbox for the site owner.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Consultation {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
