//! Record workflows: deletion semantics and public consultation intake.

mod common;

use axum::http::StatusCode;
use common::{get_with_cookie, location, post_form, post_multipart, post_with_cookie};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Deleting a record with an attachment removes both the row and the file.
#[tokio::test]
async fn delete_project_removes_row_and_file() {
    let app = common::test_app().await;
    let cookie = common::login(&app.router).await;

    post_multipart(
        app.router.clone(),
        "/admin",
        &cookie,
        &[("form_name", "project"), ("title", "Doomed")],
        Some(("image", "doomed.png", PNG_BYTES)),
    )
    .await;

    let id: i64 = sqlx::query_scalar("SELECT id FROM projects LIMIT 1")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert!(app.upload_path().join("doomed.png").exists());

    let response = post_with_cookie(
        app.router.clone(),
        &format!("/admin/delete/project/{id}"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).contains("notice="));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
    assert!(!app.upload_path().join("doomed.png").exists());
}

/// Deleting a record without an attachment removes only the row.
#[tokio::test]
async fn delete_testimonial_without_attachment() {
    let app = common::test_app().await;
    let cookie = common::login(&app.router).await;

    post_multipart(
        app.router.clone(),
        "/admin",
        &cookie,
        &[
            ("form_name", "testimonial"),
            ("customer_name", "Maria"),
            ("content", "Loved it"),
        ],
        None,
    )
    .await;

    let id: i64 = sqlx::query_scalar("SELECT id FROM testimonials LIMIT 1")
        .fetch_one(&app.pool)
        .await
        .unwrap();

    let response = post_with_cookie(
        app.router.clone(),
        &format!("/admin/delete/testimonial/{id}"),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM testimonials")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

/// Deleting a nonexistent id is a standard not-found response.
#[tokio::test]
async fn delete_missing_record_is_404() {
    let app = common::test_app().await;
    let cookie = common::login(&app.router).await;

    let response =
        post_with_cookie(app.router.clone(), "/admin/delete/project/9999", &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = common::body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

/// Delete routes are session-guarded.
#[tokio::test]
async fn delete_requires_session() {
    let app = common::test_app().await;

    let response =
        post_with_cookie(app.router.clone(), "/admin/delete/offer/1", "session=").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/admin/login"));
}

/// A valid submission creates one trimmed row and shows a confirmation.
#[tokio::test]
async fn consultation_submission_creates_trimmed_row() {
    let app = common::test_app().await;

    let response = post_form(
        app.router.clone(),
        "/consultation",
        "name=%20Ann%20&email=%20a%40x.com%20&phone=&message=hi",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.contains("notice="));
    assert!(target.ends_with("#contact"));

    let (name, email, message): (String, String, Option<String>) =
        sqlx::query_as("SELECT name, email, message FROM consultations LIMIT 1")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(name, "Ann");
    assert_eq!(email, "a@x.com");
    assert_eq!(message.as_deref(), Some("hi"));
}

/// Whitespace-only name or email creates nothing and sends the caller back
/// with a validation message.
#[tokio::test]
async fn consultation_requires_name_and_email() {
    let app = common::test_app().await;

    for body in [
        "name=%20%20&email=a%40x.com",
        "name=Ann&email=%20",
        "phone=123",
    ] {
        let response = post_form(app.router.clone(), "/consultation", body).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).contains("error="));
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM consultations")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

/// Consultations land in the admin dashboard inbox, newest first.
#[tokio::test]
async fn dashboard_lists_consultations() {
    let app = common::test_app().await;

    post_form(
        app.router.clone(),
        "/consultation",
        "name=Ann&email=a%40x.com&message=hello",
    )
    .await;

    let cookie = common::login(&app.router).await;
    let response = get_with_cookie(app.router.clone(), "/admin", &cookie).await;
    let json = common::body_json(response).await;

    let consultations = json["data"]["consultations"].as_array().unwrap();
    assert_eq!(consultations.len(), 1);
    assert_eq!(consultations[0]["name"], "Ann");
    assert_eq!(consultations[0]["email"], "a@x.com");
}

/// Unknown form discriminators are rejected outright.
#[tokio::test]
async fn unknown_form_name_is_bad_request() {
    let app = common::test_app().await;
    let cookie = common::login(&app.router).await;

    let response = post_multipart(
        app.router.clone(),
        "/admin",
        &cookie,
        &[("form_name", "gallery"), ("title", "Nope")],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
