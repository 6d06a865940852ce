//! Flash message flow through the assembled router.
//!
//! Drives the real router over an in-memory session store with a signed
//! cookie, the same shape the binary runs with, and checks that a queued
//! flash message survives asset and unmatched-path requests and renders
//! exactly once.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use tower_sessions::cookie::Key;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use meadowlark_site::app;
use meadowlark_site::config::{EmailConfig, SiteConfig};
use meadowlark_site::state::AppState;

fn test_config() -> SiteConfig {
    SiteConfig {
        database_url: SecretString::from("postgres://localhost/unused"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_owned(),
        session_secret: SecretString::from("q8Zf3kWp1nR7vX2mL9cJ4tY6hB0dG5aS"),
        data_dir: std::env::temp_dir(),
        email: EmailConfig {
            api_url: None,
            api_key: SecretString::from("unused"),
            from: "Meadowlark Travel <info@meadowlarktravel.com>".to_owned(),
        },
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// The real router over an in-memory session store.
///
/// The pool is lazy and never connects; these tests only exercise routes
/// that stay off the database.
fn test_app() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .unwrap();
    let state = AppState::new(test_config(), pool).unwrap();

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_signed(Key::derive_from(b"an-integration-test-signing-key!"));

    app::build(state, session_layer, "static")
}

fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .unwrap()
        .to_owned()
}

async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_flash_survives_asset_requests_and_renders_once() {
    let app = test_app();

    // An invalid signup queues a danger flash and redirects
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/newsletter/signup")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("name=&email=not-an-email"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&response);

    // An asset request on the same session must not consume the flash
    let response = app
        .clone()
        .oneshot(get_with_cookie("/static/no-such-file.css", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Neither must an unmatched path
    let response = app
        .clone()
        .oneshot(get_with_cookie("/no-such-page", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The next page render shows the flash
    let response = app
        .clone()
        .oneshot(get_with_cookie("/newsletter", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Validation error!"));

    // Exactly once
    let response = app
        .oneshot(get_with_cookie("/newsletter", &cookie))
        .await
        .unwrap();
    assert!(!body_string(response).await.contains("Validation error!"));
}

#[tokio::test]
async fn test_tampered_session_cookie_is_rejected() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/newsletter/signup")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("name=&email=not-an-email"))
                .unwrap(),
        )
        .await
        .unwrap();
    let mut cookie = session_cookie(&response);

    // Flipping the tail of the signed value must invalidate the cookie,
    // so the tampered request sees no pending flash
    let flipped = if cookie.ends_with('A') { 'B' } else { 'A' };
    cookie.pop();
    cookie.push(flipped);

    let response = app
        .oneshot(get_with_cookie("/newsletter", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body_string(response).await.contains("Validation error!"));
}
