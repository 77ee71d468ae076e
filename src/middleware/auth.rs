use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::{self, SESSION_COOKIE};
use crate::state::AppState;

/// Authenticated admin context extracted from the session cookie.
///
/// Guarded handlers receive this as a request extension - an explicit value
/// per request, not ambient session state.
#[derive(Clone, Debug)]
pub struct AdminContext {
    pub admin_id: i64,
    pub username: String,
}

/// Session guard for the admin area.
///
/// Validates the session cookie before the wrapped handler runs. Without a
/// valid session the request short-circuits into a redirect to the login
/// page, carrying the originally requested path so login can return there.
pub async fn session_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = session_cookie(&request);

    let claims = token
        .as_deref()
        .and_then(|t| auth::validate_session_token(t, &state.config.session_secret).ok());

    let Some(claims) = claims else {
        let next_path = request.uri().path().to_string();
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("next", &next_path)
            .finish();
        return Redirect::to(&format!("/admin/login?{}", query)).into_response();
    };

    request.extensions_mut().insert(AdminContext {
        admin_id: claims.sub,
        username: claims.username,
    });

    next.run(request).await
}

/// Extract the session cookie value from the request headers.
fn session_cookie(request: &Request) -> Option<String> {
    let header = request.headers().get(COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}
