//! JSON body extractor that runs `validator` rules.
//!
//! Every body problem is a 400. Serde failures (malformed JSON, missing
//! fields, wrong types, rejected integers) report "Invalid field values";
//! rule failures report the messages attached to the failing rules.

use std::collections::BTreeSet;

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use livefit_core::AppError;
use livefit_core::validation::{INVALID_FIELDS, parse_uuid};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// Parses a UUID path segment, failing with a 400 carrying `message`.
///
/// Path ids are taken as strings so a malformed id gets the JSON envelope
/// instead of the framework's plain-text path rejection.
pub fn parse_path_id(raw: &str, message: &str) -> Result<Uuid, AppError> {
    parse_uuid(raw).ok_or_else(|| AppError::failed(message))
}

/// Collapses validation errors into one message.
///
/// A blank or mistyped field outranks any specific rule, matching the order
/// the checks are documented in. Otherwise distinct messages are joined in a
/// stable order.
pub fn format_errors(errors: &ValidationErrors) -> String {
    let messages: BTreeSet<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .map(|err| {
            err.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| INVALID_FIELDS.to_string())
        })
        .collect();

    if messages.is_empty() || messages.contains(INVALID_FIELDS) {
        return INVALID_FIELDS.to_string();
    }

    messages.into_iter().collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                tracing::debug!(rejection = %rejection.body_text(), "rejected request body");
                AppError::bad_request(anyhow!(INVALID_FIELDS))
            })?;

        value
            .validate()
            .map_err(|errors| AppError::bad_request(anyhow!(format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}
