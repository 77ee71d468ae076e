//! Record workflows over the content tables.
//!
//! Each create is one unit: validate required fields, then store the
//! attachment (where the record type has one), then insert the row. A
//! validation or attachment failure leaves no new state. A file written
//! before a failed insert is a known inconsistency window - the design
//! runs on autocommit and performs no multi-statement transactions.

use std::path::Path;

use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::{Consultation, Offer, Project, Testimonial};
use crate::uploads::{self, Attachment, UploadError, ALLOWED_EXTENSIONS};

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// User-recoverable: missing required field or rejected attachment.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Attachment write failed: {0}")]
    Upload(std::io::Error),
}

impl From<UploadError> for WorkflowError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::DisallowedType { .. } => WorkflowError::Validation(err.to_string()),
            UploadError::Io(e) => WorkflowError::Upload(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Workflow inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ProjectInput {
    pub title: String,
    pub description: Option<String>,
    pub attachment: Option<Attachment>,
}

#[derive(Debug, Default)]
pub struct TestimonialInput {
    pub customer_name: String,
    pub content: String,
    pub attachment: Option<Attachment>,
}

#[derive(Debug, Default)]
pub struct OfferInput {
    pub title: String,
    pub details: String,
}

#[derive(Debug, Default)]
pub struct ConsultationInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

fn require(value: &str, message: &str) -> Result<(), WorkflowError> {
    if value.trim().is_empty() {
        return Err(WorkflowError::Validation(message.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Create workflows
// ---------------------------------------------------------------------------

pub async fn create_project(
    pool: &SqlitePool,
    upload_dir: &Path,
    input: ProjectInput,
) -> Result<Project, WorkflowError> {
    require(&input.title, "Title is required.")?;

    let image_filename =
        uploads::store_attachment(upload_dir, input.attachment, ALLOWED_EXTENSIONS).await?;

    let project = sqlx::query_as::<_, Project>(
        "INSERT INTO projects (title, description, image_filename, created_at) \
         VALUES (?, ?, ?, ?) RETURNING *",
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(&image_filename)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(project)
}

pub async fn create_testimonial(
    pool: &SqlitePool,
    upload_dir: &Path,
    input: TestimonialInput,
) -> Result<Testimonial, WorkflowError> {
    require(&input.customer_name, "Customer name is required.")?;
    require(&input.content, "Testimonial content is required.")?;

    let photo_filename =
        uploads::store_attachment(upload_dir, input.attachment, ALLOWED_EXTENSIONS).await?;

    let testimonial = sqlx::query_as::<_, Testimonial>(
        "INSERT INTO testimonials (customer_name, content, photo_filename, created_at) \
         VALUES (?, ?, ?, ?) RETURNING *",
    )
    .bind(&input.customer_name)
    .bind(&input.content)
    .bind(&photo_filename)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(testimonial)
}

/// Offers are created active and carry no attachment.
pub async fn create_offer(pool: &SqlitePool, input: OfferInput) -> Result<Offer, WorkflowError> {
    require(&input.title, "Offer title is required.")?;
    require(&input.details, "Offer details are required.")?;

    let offer = sqlx::query_as::<_, Offer>(
        "INSERT INTO offers (title, details, active) VALUES (?, ?, 1) RETURNING *",
    )
    .bind(&input.title)
    .bind(&input.details)
    .fetch_one(pool)
    .await?;

    Ok(offer)
}

/// Public consultation submission. All fields are trimmed; name and email
/// must be non-empty after trimming.
pub async fn create_consultation(
    pool: &SqlitePool,
    input: ConsultationInput,
) -> Result<Consultation, WorkflowError> {
    let name = input.name.trim();
    let email = input.email.trim();
    if name.is_empty() || email.is_empty() {
        return Err(WorkflowError::Validation(
            "Please provide at least your name and email.".to_string(),
        ));
    }

    let consultation = sqlx::query_as::<_, Consultation>(
        "INSERT INTO consultations (name, email, phone, message, created_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING *",
    )
    .bind(name)
    .bind(email)
    .bind(input.phone.trim())
    .bind(input.message.trim())
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(consultation)
}

// ---------------------------------------------------------------------------
// Delete workflows
// ---------------------------------------------------------------------------

pub async fn delete_project(
    pool: &SqlitePool,
    upload_dir: &Path,
    id: i64,
) -> Result<(), WorkflowError> {
    let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| WorkflowError::NotFound(format!("Project {} not found", id)))?;

    if let Some(filename) = &project.image_filename {
        uploads::remove_attachment(upload_dir, filename).await;
    }

    sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_testimonial(
    pool: &SqlitePool,
    upload_dir: &Path,
    id: i64,
) -> Result<(), WorkflowError> {
    let testimonial = sqlx::query_as::<_, Testimonial>("SELECT * FROM testimonials WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| WorkflowError::NotFound(format!("Testimonial {} not found", id)))?;

    if let Some(filename) = &testimonial.photo_filename {
        uploads::remove_attachment(upload_dir, filename).await;
    }

    sqlx::query("DELETE FROM testimonials WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_offer(pool: &SqlitePool, id: i64) -> Result<(), WorkflowError> {
    let deleted = sqlx::query("DELETE FROM offers WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if deleted.rows_affected() == 0 {
        return Err(WorkflowError::NotFound(format!("Offer {} not found", id)));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read queries
// ---------------------------------------------------------------------------

pub async fn list_projects(pool: &SqlitePool) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM projects ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_testimonials(pool: &SqlitePool) -> Result<Vec<Testimonial>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM testimonials ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_active_offers(pool: &SqlitePool) -> Result<Vec<Offer>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM offers WHERE active = 1")
        .fetch_all(pool)
        .await
}

/// All offers, newest id first. Admin dashboard view.
pub async fn list_offers(pool: &SqlitePool) -> Result<Vec<Offer>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM offers ORDER BY id DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_consultations(pool: &SqlitePool) -> Result<Vec<Consultation>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM consultations ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}
