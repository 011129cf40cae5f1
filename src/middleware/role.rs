//! Role gate for coach-only endpoints.

use axum::{extract::FromRequestParts, http::request::Parts};
use livefit_core::AppError;
use livefit_models::UserRole;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub const NOT_COACH_MESSAGE: &str = "User is not a coach";

/// Fails with 401 unless the user holds `required`.
pub fn check_role(auth_user: &AuthUser, required: UserRole) -> Result<(), AppError> {
    if auth_user.role() != required {
        return Err(AppError::unauthorized(match required {
            UserRole::Coach => NOT_COACH_MESSAGE.to_string(),
            UserRole::User => format!("User role {} required", required),
        }));
    }
    Ok(())
}

/// The signed-in user, rejected with 401 unless they are a coach.
///
/// ```rust,ignore
/// async fn create_course(RequireCoach(coach): RequireCoach) -> impl IntoResponse { /* ... */ }
/// ```
#[derive(Debug, Clone)]
pub struct RequireCoach(pub AuthUser);

impl FromRequestParts<AppState> for RequireCoach {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_role(&auth_user, UserRole::Coach)?;
        Ok(RequireCoach(auth_user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use livefit_models::User;
    use uuid::Uuid;

    fn auth_user(role: &str) -> AuthUser {
        AuthUser(User {
            id: Uuid::new_v4(),
            name: "Jamie".to_string(),
            email: "jamie@example.com".to_string(),
            password: String::new(),
            role: role.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    #[test]
    fn test_coach_passes() {
        assert!(check_role(&auth_user("COACH"), UserRole::Coach).is_ok());
        assert!(auth_user("COACH").is_coach());
    }

    #[test]
    fn test_user_is_rejected_with_401() {
        let err = check_role(&auth_user("USER"), UserRole::Coach).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.error.to_string(), NOT_COACH_MESSAGE);
    }

    #[test]
    fn test_unknown_role_is_treated_as_user() {
        assert!(check_role(&auth_user("ADMIN"), UserRole::Coach).is_err());
        assert!(check_role(&auth_user("ADMIN"), UserRole::User).is_ok());
    }
}
