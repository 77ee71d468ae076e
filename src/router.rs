use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, public};
use crate::middleware::session_guard;
use crate::state::AppState;

/// Build the full application router.
///
/// Used by both the binary and the integration tests so they exercise the
/// same routes and middleware stack.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Public read surface and consultation form
        .merge(public_routes())
        // Login/logout are reachable without a session
        .merge(admin_auth_routes())
        // Everything else under /admin sits behind the session guard
        .merge(admin_routes(state.clone()))
        // Stored attachments, served by exact filename
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::home))
        .route("/projects", get(public::projects_page))
        .route("/consultation", post(public::book_consultation))
        .route("/api/active-offers", get(public::active_offers_api))
        .route("/health", get(public::health))
}

fn admin_auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/login",
            get(admin::login_page).post(admin::login_submit),
        )
        .route("/admin/logout", get(admin::logout))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin::dashboard).post(admin::dashboard_submit))
        .route("/admin/delete/project/:id", post(admin::delete_project))
        .route(
            "/admin/delete/testimonial/:id",
            post(admin::delete_testimonial),
        )
        .route("/admin/delete/offer/:id", post(admin::delete_offer))
        .route_layer(middleware::from_fn_with_state(state, session_guard))
}
