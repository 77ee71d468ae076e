//! Public, unauthenticated routes: read surface, consultation form, health.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::content_service::{self, ConsultationInput, WorkflowError};
use crate::state::AppState;

/// GET / - home listing: projects and testimonials newest-first, plus
/// currently active offers.
pub async fn home(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let projects = content_service::list_projects(&state.pool).await?;
    let testimonials = content_service::list_testimonials(&state.pool).await?;
    let offers = content_service::list_active_offers(&state.pool).await?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "projects": projects,
            "testimonials": testimonials,
            "offers": offers,
        }
    })))
}

/// GET /projects - full project listing, newest first.
pub async fn projects_page(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let projects = content_service::list_projects(&state.pool).await?;

    Ok(Json(json!({
        "success": true,
        "data": { "projects": projects }
    })))
}

#[derive(Debug, Deserialize)]
pub struct ConsultationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

/// POST /consultation - public "book a consultation" form submission.
///
/// Redirects back to the contact section of the home page either way; a
/// validation failure creates nothing and carries the message as `error`.
pub async fn book_consultation(
    State(state): State<AppState>,
    Form(form): Form<ConsultationForm>,
) -> Result<Redirect, ApiError> {
    let input = ConsultationInput {
        name: form.name,
        email: form.email,
        phone: form.phone,
        message: form.message,
    };

    match content_service::create_consultation(&state.pool, input).await {
        Ok(_) => Ok(redirect_to_contact(
            "notice",
            "Thank you! Your consultation request has been received. We will contact you soon.",
        )),
        Err(WorkflowError::Validation(msg)) => Ok(redirect_to_contact("error", &msg)),
        Err(other) => Err(other.into()),
    }
}

fn redirect_to_contact(key: &str, message: &str) -> Redirect {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(key, message)
        .finish();
    Redirect::to(&format!("/?{}#contact", query))
}

/// Wire shape for the machine-readable offer listing: exactly id, title,
/// details.
#[derive(Debug, Serialize)]
pub struct OfferSummary {
    pub id: i64,
    pub title: String,
    pub details: String,
}

/// GET /api/active-offers - bare JSON array of active offers.
pub async fn active_offers_api(
    State(state): State<AppState>,
) -> Result<Json<Vec<OfferSummary>>, ApiError> {
    let offers = content_service::list_active_offers(&state.pool).await?;
    let data = offers
        .into_iter()
        .map(|o| OfferSummary {
            id: o.id,
            title: o.title,
            details: o.details,
        })
        .collect();
    Ok(Json(data))
}

/// GET /health - liveness plus a database ping.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "version": env!("CARGO_PKG_VERSION"),
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
