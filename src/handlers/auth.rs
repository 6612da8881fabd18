use axum::{
    extract::{FromRef, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{Credentials, UserResponse};
use crate::repositories::{SessionRepository, UserRepository};
use crate::session::{create_session_cookie, extract_token, remove_session_cookie};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, FromRef)]
pub struct AuthState {
    pub user_repo: UserRepository,
    pub session_repo: SessionRepository,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn register(
    State(state): State<AuthState>,
    Json(credentials): Json<Credentials>,
) -> Result<Response> {
    let username = credentials.username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }
    if credentials.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let user = state.user_repo.create(username, &credentials.password).await?;
    tracing::info!("Registered user {} ({})", user.username, user.id);

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
}

pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    Json(credentials): Json<Credentials>,
) -> Result<Response> {
    let user = state
        .user_repo
        .verify_password(credentials.username.trim(), &credentials.password)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let token = state.session_repo.create(user.id).await?;
    tracing::debug!("User {} logged in", user.id);

    let jar = jar.add(create_session_cookie(&token));
    Ok((
        jar,
        Json(LoginResponse {
            token,
            user: user.into(),
        }),
    )
        .into_response())
}

pub async fn logout(
    State(state): State<AuthState>,
    _auth_user: AuthUser,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<Response> {
    if let Some(token) = extract_token(&headers) {
        state.session_repo.delete(&token).await?;
    }

    let jar = jar.add(remove_session_cookie());
    Ok((
        jar,
        Json(MessageResponse {
            message: "Logged out",
        }),
    )
        .into_response())
}

pub async fn me(State(state): State<AuthState>, auth_user: AuthUser) -> Result<Json<UserResponse>> {
    let user = state
        .user_repo
        .find_by_id(auth_user.id)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(user.into()))
}
