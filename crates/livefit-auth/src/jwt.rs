//! Access token creation and verification.
//!
//! Tokens are HS256 JWTs signed with `JWT_SECRET` and valid for
//! `JWT_EXPIRES_DAY` days. Verification distinguishes an expired token from
//! any other failure because clients show a different prompt for each.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use livefit_config::JwtConfig;
use livefit_core::AppError;

use crate::claims::Claims;

pub const EXPIRED_TOKEN_MESSAGE: &str = "Token has expired";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

pub fn create_access_token(
    user_id: Uuid,
    role: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now + jwt_config.expires_in_seconds();

    let claims = Claims {
        id: user_id.to_string(),
        role: role.to_string(),
        iat: now as usize,
        exp: exp as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized(EXPIRED_TOKEN_MESSAGE.to_string()),
        _ => AppError::unauthorized(INVALID_TOKEN_MESSAGE.to_string()),
    })
}
