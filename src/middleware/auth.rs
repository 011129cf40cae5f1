use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use livefit_auth::{INVALID_TOKEN_MESSAGE, verify_token};
use livefit_core::AppError;
use livefit_models::{User, UserRole};
use tracing::debug;
use uuid::Uuid;

use crate::state::AppState;

pub const NOT_LOGGED_IN_MESSAGE: &str = "You are not logged in";

/// The user named by a valid bearer token, freshly loaded from the database.
///
/// The loaded user is cached in the request extensions, so a route layer and
/// the handler behind it share one lookup.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn role(&self) -> UserRole {
        self.0.role()
    }

    pub fn is_coach(&self) -> bool {
        self.role() == UserRole::Coach
    }
}

fn invalid_token() -> AppError {
    AppError::unauthorized(INVALID_TOKEN_MESSAGE.to_string())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(cached) = parts.extensions.get::<AuthUser>() {
            return Ok(cached.clone());
        }

        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::unauthorized(NOT_LOGGED_IN_MESSAGE.to_string()))?;

        let claims = verify_token(bearer.token(), &state.jwt_config)?;
        let user_id = Uuid::parse_str(&claims.id).map_err(|_| invalid_token())?;

        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, role, created_at, updated_at
             FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| {
            debug!(user.id = %user_id, "token names a user that no longer exists");
            invalid_token()
        })?;

        let auth_user = AuthUser(user);
        parts.extensions.insert(auth_user.clone());
        Ok(auth_user)
    }
}
