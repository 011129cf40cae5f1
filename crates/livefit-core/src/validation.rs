//! Primitive validators shared by request DTOs and handlers.
//!
//! The predicates here are plain functions over primitive values. The
//! `validate_*` adapters wrap them for `#[validate(custom(...))]` and attach
//! the user-facing message, so the `ValidatedJson` extractor can report it
//! verbatim.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;
use uuid::Uuid;
use validator::{ValidateEmail, ValidationError};

pub const INVALID_FIELDS: &str = "Invalid field values";
pub const INVALID_ID: &str = "Invalid ID";
pub const INVALID_EMAIL: &str = "Invalid email format";
pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const PASSWORD_RULE: &str = "Password must be 8-16 characters and include an uppercase letter, a lowercase letter and a digit";
pub const INVALID_DATE: &str = "Invalid date format, use ISO 8601";
pub const START_AFTER_END: &str = "Start time cannot be later than end time";
pub const DUPLICATE_DATA: &str = "Duplicate data";
pub const STILL_IN_USE: &str = "Data is still in use";

const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 16;
const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;

/// True when the value is absent, empty or only whitespace.
pub fn is_not_valid_string(value: Option<&str>) -> bool {
    value.is_none_or(|s| s.trim().is_empty())
}

/// True when the value is absent, not a JSON number, negative or fractional.
pub fn is_not_valid_integer(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(n)) => n
            .as_f64()
            .is_none_or(|f| f < 0.0 || f.fract() != 0.0),
        _ => true,
    }
}

/// Canonical hyphenated UUID with version 1-5 and the RFC 4122 variant.
pub fn is_valid_uuid(value: &str) -> bool {
    if value.len() != 36 {
        return false;
    }

    match Uuid::try_parse(value) {
        Ok(id) => {
            matches!(id.get_version_num(), 1..=5) && id.get_variant() == uuid::Variant::RFC4122
        }
        Err(_) => false,
    }
}

pub fn is_valid_password(value: &str) -> bool {
    let len = value.chars().count();
    (PASSWORD_MIN..=PASSWORD_MAX).contains(&len)
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
}

pub fn is_valid_email(value: &str) -> bool {
    value.validate_email()
}

pub fn is_https_url(value: &str) -> bool {
    value.starts_with("https")
}

pub fn is_iso8601(value: &str) -> bool {
    parse_iso8601(value).is_some()
}

/// Parses an ISO 8601 timestamp.
///
/// Accepts RFC 3339 with an offset, a local date-time (taken as UTC) or a
/// bare calendar date (midnight UTC).
pub fn parse_iso8601(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parses a path id, rejecting anything [`is_valid_uuid`] would.
pub fn parse_uuid(value: &str) -> Option<Uuid> {
    if is_not_valid_string(Some(value)) || !is_valid_uuid(value) {
        return None;
    }
    Uuid::try_parse(value).ok()
}

/// Parses a strictly positive integer from a query string value.
pub fn parse_positive_int(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|n| *n > 0)
}

fn error_with(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if is_not_valid_string(Some(value)) {
        return Err(error_with("blank", INVALID_FIELDS));
    }
    Ok(())
}

/// Display names: 2 to 50 characters after trimming.
pub fn validate_name(value: &str) -> Result<(), ValidationError> {
    if is_not_valid_string(Some(value)) {
        return Err(error_with("blank", INVALID_FIELDS));
    }
    let len = value.trim().chars().count();
    if len < NAME_MIN {
        return Err(error_with("name_length", NAME_TOO_SHORT));
    }
    if len > NAME_MAX {
        return Err(error_with("name_length", INVALID_FIELDS));
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    if is_not_valid_string(Some(value)) {
        return Err(error_with("blank", INVALID_FIELDS));
    }
    if !is_valid_password(value) {
        return Err(error_with("password", PASSWORD_RULE));
    }
    Ok(())
}

pub fn validate_https_url(value: &str) -> Result<(), ValidationError> {
    if is_not_valid_string(Some(value)) || !is_https_url(value) {
        return Err(error_with("https_url", INVALID_FIELDS));
    }
    Ok(())
}

pub fn validate_uuid(value: &str) -> Result<(), ValidationError> {
    if is_not_valid_string(Some(value)) || !is_valid_uuid(value) {
        return Err(error_with("uuid", INVALID_FIELDS));
    }
    Ok(())
}

/// Serde adapter for integer fields that must be whole and non-negative.
///
/// `3` and `3.0` are accepted; `-1`, `2.5`, `"3"` and `null` are rejected.
pub fn non_negative_integer<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = Value::deserialize(deserializer)?;
    if is_not_valid_integer(Some(&value)) {
        return Err(D::Error::custom(INVALID_FIELDS));
    }

    let whole = value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .ok_or_else(|| D::Error::custom(INVALID_FIELDS))?;

    T::try_from(whole).map_err(|_| D::Error::custom(INVALID_FIELDS))
}
