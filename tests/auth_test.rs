mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_register_creates_user() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let body = json!({ "username": "newuser", "password": "password123" }).to_string();
    let response = app
        .oneshot(common::json_request("/auth/register", None, body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let user = common::body_json(response).await;
    assert_eq!(user["username"], "newuser");
    assert!(user["id"].is_i64());
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_validates_input() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    for body in [
        json!({ "username": "   ", "password": "password123" }),
        json!({ "username": "shorty", "password": "12345" }),
    ] {
        let response = app
            .clone()
            .oneshot(common::json_request("/auth/register", None, body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    common::create_test_user(&pool, "taken", "password123").await;

    let body = json!({ "username": "taken", "password": "password456" }).to_string();
    let response = app
        .oneshot(common::json_request("/auth/register", None, body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_success_sets_cookie_and_token() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    common::create_test_user(&pool, "lifter", "password123").await;

    let body = json!({ "username": "lifter", "password": "password123" }).to_string();
    let response = app
        .clone()
        .oneshot(common::json_request("/auth/login", None, body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("HttpOnly"));

    let login = common::body_json(response).await;
    let token = login["token"].as_str().unwrap().to_string();
    assert_eq!(login["user"]["username"], "lifter");

    // The cookie alone authenticates
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .header(header::COOKIE, common::extract_cookie_header(&set_cookie))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // So does the bearer token
    let response = app
        .oneshot(common::get_request("/auth/me", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["username"], "lifter");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    common::create_test_user(&pool, "lifter", "password123").await;

    let body = json!({ "username": "lifter", "password": "nope-nope" }).to_string();
    let response = app
        .oneshot(common::json_request("/auth/login", None, body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    let user = common::create_test_user(&pool, "lifter", "password123").await;
    let token = common::create_session_token(&pool, &user).await;

    let response = app
        .clone()
        .oneshot(common::json_request("/auth/logout", Some(&token), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(common::get_request("/api/data/export", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_auth() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_database() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    assert!(body["git_version"].is_string());
}
