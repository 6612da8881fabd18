use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::error::AppError;
use crate::repositories::SessionRepository;
use crate::session::extract_token;

/// The authenticated caller. Handlers scope every storage call by `id`.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i64,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    SessionRepository: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers).ok_or(AppError::Unauthorized)?;

        let session_repo = SessionRepository::from_ref(state);
        let user_id = session_repo
            .find_valid(&token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser { id: user_id })
    }
}
