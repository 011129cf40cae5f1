//! # LiveFit Auth
//!
//! Bearer token issuing and verification for the LiveFit API.
//!
//! Tokens carry only the user id and role. Request handlers always reload
//! the user from the database, so a deleted account stops working even while
//! its token is still within its lifetime.
//!
//! # Example
//!
//! ```ignore
//! use livefit_auth::{create_access_token, verify_token};
//!
//! let token = create_access_token(user.id, &user.role, &jwt_config)?;
//! let claims = verify_token(&token, &jwt_config)?;
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{EXPIRED_TOKEN_MESSAGE, INVALID_TOKEN_MESSAGE, create_access_token, verify_token};
