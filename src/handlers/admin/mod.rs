//! Session-guarded admin area: login/logout, dashboard, create and delete
//! workflows. Everything except login/logout runs behind
//! `middleware::session_guard`.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use axum::{Extension, Form, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{redirect_with_error, redirect_with_notice};
use crate::auth::{self, SESSION_COOKIE};
use crate::error::ApiError;
use crate::middleware::AdminContext;
use crate::services::content_service::{
    self, OfferInput, ProjectInput, TestimonialInput, WorkflowError,
};
use crate::state::AppState;
use crate::uploads::Attachment;

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /admin/login - login page data. The `next` parameter survives the
/// form round trip so a successful login can return the caller to the page
/// it originally requested.
pub async fn login_page(Query(query): Query<LoginQuery>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "form": "login",
            "fields": ["username", "password"],
            "next": query.next,
        }
    }))
}

/// POST /admin/login - authenticate and establish the session.
///
/// Failure answers with one generic message regardless of which credential
/// was wrong, and changes no session state.
pub async fn login_submit(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    let admin = auth::authenticate(&state.pool, &form.username, &form.password).await?;

    let Some(admin) = admin else {
        let login_path = match &query.next {
            Some(next) => {
                let q: String = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair("next", next)
                    .finish();
                format!("/admin/login?{}", q)
            }
            None => "/admin/login".to_string(),
        };
        return Ok(redirect_with_error(&login_path, "Invalid username or password.").into_response());
    };

    let token = auth::issue_session_token(
        &admin,
        &state.config.session_secret,
        state.config.session_expiry_hours,
    )
    .map_err(|e| ApiError::internal_server_error(e.to_string()))?;

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, token
    );

    let destination = query
        .next
        .as_deref()
        .filter(|next| next.starts_with('/') && !next.starts_with("//"))
        .unwrap_or("/admin");

    tracing::info!(username = %admin.username, "Admin logged in");

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        redirect_with_notice(destination, "Logged in successfully."),
    )
        .into_response())
}

/// GET /admin/logout - clear the session cookie unconditionally.
///
/// Idempotent: succeeds whether or not a session was active.
pub async fn logout() -> impl IntoResponse {
    let cookie = format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE);
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        redirect_with_notice("/admin/login", "Logged out."),
    )
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// GET /admin - dashboard data: every record list the admin page shows.
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminContext>,
) -> Result<Json<Value>, ApiError> {
    let projects = content_service::list_projects(&state.pool).await?;
    let testimonials = content_service::list_testimonials(&state.pool).await?;
    let offers = content_service::list_offers(&state.pool).await?;
    let consultations = content_service::list_consultations(&state.pool).await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "admin": admin.username,
            "projects": projects,
            "testimonials": testimonials,
            "offers": offers,
            "consultations": consultations,
        }
    })))
}

/// A parsed admin dashboard form: text fields plus at most one attachment.
#[derive(Debug, Default)]
struct AdminForm {
    fields: HashMap<String, String>,
    attachment: Option<Attachment>,
}

impl AdminForm {
    fn field(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }
}

async fn read_admin_form(mut multipart: Multipart) -> Result<AdminForm, ApiError> {
    let mut form = AdminForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match field.file_name() {
            // A file input with no selection arrives with an empty filename;
            // that counts as "no attachment supplied".
            Some(filename) if !filename.is_empty() => {
                let filename = filename.to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?
                    .to_vec();
                form.attachment = Some(Attachment { filename, bytes });
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}

/// POST /admin - run one of the create workflows.
///
/// The multipart body carries a `form_name` discriminator selecting the
/// project, testimonial, or offer workflow, plus that workflow's fields and
/// optional attachment. Validation failures redirect back to the dashboard
/// with the message and create nothing.
pub async fn dashboard_submit(
    State(state): State<AppState>,
    Extension(_admin): Extension<AdminContext>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_admin_form(multipart).await?;
    let upload_dir = state.config.upload_dir.clone();

    let outcome = match form.field("form_name").as_str() {
        "project" => {
            let input = ProjectInput {
                title: form.field("title"),
                description: non_empty(form.field("description")),
                attachment: form.attachment,
            };
            content_service::create_project(&state.pool, &upload_dir, input)
                .await
                .map(|_| "Project uploaded")
        }
        "testimonial" => {
            let input = TestimonialInput {
                customer_name: form.field("customer_name"),
                content: form.field("content"),
                attachment: form.attachment,
            };
            content_service::create_testimonial(&state.pool, &upload_dir, input)
                .await
                .map(|_| "Testimonial uploaded")
        }
        "offer" => {
            let input = OfferInput {
                title: form.field("title"),
                details: form.field("details"),
            };
            content_service::create_offer(&state.pool, input)
                .await
                .map(|_| "Offer saved")
        }
        other => {
            return Err(ApiError::bad_request(format!(
                "Unknown form type: {:?}",
                other
            )))
        }
    };

    match outcome {
        Ok(notice) => Ok(redirect_with_notice("/admin", notice).into_response()),
        Err(WorkflowError::Validation(msg)) => {
            Ok(redirect_with_error("/admin", &msg).into_response())
        }
        Err(other) => Err(other.into()),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

// ---------------------------------------------------------------------------
// Delete routes
// ---------------------------------------------------------------------------

/// POST /admin/delete/project/:id
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(_admin): Extension<AdminContext>,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    content_service::delete_project(&state.pool, &state.config.upload_dir, id).await?;
    Ok(redirect_with_notice("/admin", "Project deleted successfully."))
}

/// POST /admin/delete/testimonial/:id
pub async fn delete_testimonial(
    State(state): State<AppState>,
    Extension(_admin): Extension<AdminContext>,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    content_service::delete_testimonial(&state.pool, &state.config.upload_dir, id).await?;
    Ok(redirect_with_notice(
        "/admin",
        "Testimonial deleted successfully.",
    ))
}

/// POST /admin/delete/offer/:id
pub async fn delete_offer(
    State(state): State<AppState>,
    Extension(_admin): Extension<AdminContext>,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    content_service::delete_offer(&state.pool, id).await?;
    Ok(redirect_with_notice("/admin", "Offer deleted successfully."))
}
