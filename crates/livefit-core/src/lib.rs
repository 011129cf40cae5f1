//! # LiveFit Core
//!
//! Core types, errors, and utilities for the LiveFit API.
//!
//! This crate provides foundational types used throughout the LiveFit application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`response`]: The `{"status": "success", "data": ...}` response envelope
//! - [`validation`]: Primitive validators shared by every request DTO
//! - [`pagination`]: `per`/`page` query handling for list endpoints
//! - [`password`]: Password hashing and verification
//! - [`file_storage`]: Storage abstraction for uploaded images
//!
//! # Example
//!
//! ```ignore
//! use livefit_core::errors::AppError;
//! use livefit_core::validation::{is_valid_password, is_valid_uuid};
//!
//! if !is_valid_uuid(raw_id) {
//!     return Err(AppError::bad_request(anyhow::anyhow!("Invalid ID")));
//! }
//! ```

pub mod errors;
pub mod file_storage;
pub mod pagination;
pub mod password;
pub mod response;
pub mod validation;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use file_storage::{FileStorage, LocalFileStorage, StorageError};
pub use pagination::{PageQuery, PaginationMeta};
pub use password::{hash_password, verify_password};
pub use response::{ApiResponse, Created, NullData, Paginated};
