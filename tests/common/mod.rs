//! Shared helpers for the integration tests.
//!
//! Each test builds its own in-process app: an in-memory SQLite pool (one
//! connection, so every request sees the same database), a temp upload
//! directory, and the exact router the production binary uses.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use studio_api::config::AppConfig;
use studio_api::database;
use studio_api::router::build_router;
use studio_api::state::AppState;

pub const TEST_ADMIN: &str = "admin";
pub const TEST_PASSWORD: &str = "admin";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    /// Owns the temp dir; dropping it removes stored uploads.
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn upload_path(&self) -> &std::path::Path {
        self.upload_dir.path()
    }

    /// Number of files currently stored in the upload directory.
    pub fn stored_upload_count(&self) -> usize {
        match std::fs::read_dir(self.upload_path()) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }
}

pub async fn test_app() -> TestApp {
    // A single long-lived connection: an in-memory database exists only as
    // long as its connection, and every request must see the same one.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should open");

    database::run_migrations(&pool)
        .await
        .expect("migrations should apply");
    database::bootstrap_admin(&pool, TEST_ADMIN, TEST_PASSWORD)
        .await
        .expect("bootstrap admin should succeed");

    let upload_dir = tempfile::tempdir().expect("temp upload dir");

    let config = AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: "sqlite::memory:".into(),
        upload_dir: upload_dir.path().to_path_buf(),
        session_secret: "test-secret".into(),
        session_expiry_hours: 1,
    };

    let state = AppState::new(pool.clone(), config);

    TestApp {
        router: build_router(state),
        pool,
        upload_dir,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub const MULTIPART_BOUNDARY: &str = "studio-test-boundary";

/// Hand-rolled multipart/form-data body: text fields plus an optional file.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(
    app: Router,
    uri: &str,
    cookie: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields, file)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response should carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// Extract the `session=...` pair from a Set-Cookie header, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let raw = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = raw.split(';').next()?.trim();
    pair.starts_with("session=").then(|| pair.to_string())
}

/// Log in through the API and return the session cookie pair.
pub async fn login(app: &Router) -> String {
    let body = format!("username={TEST_ADMIN}&password={TEST_PASSWORD}");
    let response = post_form(app.clone(), "/admin/login", &body).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER, "login should redirect");
    session_cookie(&response).expect("login should set the session cookie")
}
