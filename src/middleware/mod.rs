//! Middleware and extractors for authentication and role checks.
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` verifies the JWT and loads the user it names
//! 3. `RequireCoach` rejects users whose role is not `COACH`
//! 4. Handler executes if all checks pass
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//! use crate::middleware::role::RequireCoach;
//!
//! async fn get_profile(auth_user: AuthUser) -> impl IntoResponse { /* ... */ }
//!
//! async fn create_course(RequireCoach(coach): RequireCoach) -> impl IntoResponse { /* ... */ }
//! ```

pub mod auth;
pub mod role;
