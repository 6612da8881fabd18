use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::db::DbPool;
use crate::handlers::{auth, data, health};

pub fn create_router(
    pool: DbPool,
    auth_state: auth::AuthState,
    data_state: data::DataState,
    import_body_limit: usize,
) -> Router {
    Router::new()
        // Health
        .route("/health", get(health::health_check))
        .with_state(pool)
        // Auth routes
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .with_state(auth_state)
        // Data exchange routes
        .route("/api/data/export", get(data::export))
        .route(
            "/api/data/import",
            post(data::import).layer(DefaultBodyLimit::max(import_body_limit)),
        )
        .with_state(data_state)
}
