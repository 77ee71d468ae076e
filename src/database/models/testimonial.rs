use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A customer testimonial, optionally with a customer photo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Testimonial {
    pub id: i64,
    pub customer_name: String,
    pub content: String,
    pub photo_filename: Option<String>,
    pub created_at: DateTime<Utc>,
}
