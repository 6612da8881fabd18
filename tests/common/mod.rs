#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use http_body_util::BodyExt;

use fittrack::db::{create_memory_pool, DbPool};
use fittrack::handlers::{auth, data};
use fittrack::migrations::run_migrations_for_tests;
use fittrack::models::{Snapshot, User};
use fittrack::repositories::{SessionRepository, SnapshotRepository, UserRepository};

pub const TEST_BODY_LIMIT: usize = 1024 * 1024;

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    let session_repo = SessionRepository::new(pool.clone());

    let auth_state = auth::AuthState {
        user_repo: UserRepository::new(pool.clone()),
        session_repo: session_repo.clone(),
    };
    let data_state = data::DataState {
        snapshot_repo: SnapshotRepository::new(pool.clone()),
        session_repo,
    };

    fittrack::routes::create_router(pool, auth_state, data_state, TEST_BODY_LIMIT)
}

pub async fn create_test_user(pool: &DbPool, username: &str, password: &str) -> User {
    let user_repo = UserRepository::new(pool.clone());
    user_repo.create(username, password).await.unwrap()
}

pub async fn create_session_token(pool: &DbPool, user: &User) -> String {
    let session_repo = SessionRepository::new(pool.clone());
    session_repo.create(user.id).await.unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn extract_cookie_header(set_cookie: &str) -> String {
    // Extract just the cookie name=value part for use in Cookie header
    set_cookie.split(';').next().unwrap_or("").to_string()
}

pub fn get_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, bearer(token))
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(uri: &str, token: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, bearer(token));
    }
    builder.body(body.into()).unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Clears storage-assigned ids so two exports can be compared by content.
pub fn strip_ids(mut snapshot: Snapshot) -> Snapshot {
    for template in &mut snapshot.templates {
        template.id = None;
        for exercise in &mut template.exercises {
            exercise.id = None;
            for set in &mut exercise.sets {
                set.id = None;
            }
        }
    }
    for record in &mut snapshot.history {
        record.id = None;
    }
    for record in &mut snapshot.scan_history {
        record.id = None;
    }
    snapshot
}
