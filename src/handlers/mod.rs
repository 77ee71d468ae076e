use axum::response::Redirect;

pub mod admin;
pub mod public;

/// Redirect carrying a user-visible flash message as a query parameter.
///
/// Browser-flow POST handlers answer with a redirect back to the page the
/// user came from; `notice` marks success, `error` marks a recoverable
/// failure. The rendering layer (external to this service) displays them.
pub(crate) fn redirect_with(path: &str, key: &str, message: &str) -> Redirect {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(key, message)
        .finish();
    Redirect::to(&format!("{}?{}", path, query))
}

pub(crate) fn redirect_with_notice(path: &str, message: &str) -> Redirect {
    redirect_with(path, "notice", message)
}

pub(crate) fn redirect_with_error(path: &str, message: &str) -> Redirect {
    redirect_with(path, "error", message)
}
