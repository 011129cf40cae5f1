//! Courses.
//!
//! `courses.user_id` is the owning coach's user id. Times are stored as
//! `timestamptz`; the DTO carries them as strings so a malformed timestamp
//! is reported with its own message rather than as a generic field error.

use chrono::{DateTime, Utc};
use livefit_core::validation::{
    non_negative_integer, validate_https_url, validate_not_blank, validate_uuid,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skill_id: Uuid,
    pub name: String,
    pub description: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub max_participants: i32,
    pub meeting_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the public course listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseListItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub max_participants: i32,
    pub coach_name: String,
    pub skill_name: String,
}

/// A course as listed on a coach's public page.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CoachCourseItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub max_participants: i32,
    pub skill_name: String,
}

/// A course as seen by its owner, with the number of active bookings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OwnedCourseItem {
    pub id: Uuid,
    pub name: String,
    pub skill_name: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub max_participants: i32,
    pub participants: i64,
    pub meeting_url: String,
}

/// Body shared by course create and update.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CourseDto {
    #[validate(custom(function = "validate_uuid"))]
    pub skill_id: String,
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 100, message = "Invalid field values")
    )]
    pub name: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,
    /// ISO 8601, e.g. `2025-03-01T10:00:00Z`
    #[validate(custom(function = "validate_not_blank"))]
    pub start_at: String,
    /// ISO 8601, not earlier than `start_at`
    #[validate(custom(function = "validate_not_blank"))]
    pub end_at: String,
    #[serde(deserialize_with = "non_negative_integer")]
    #[schema(minimum = 0)]
    pub max_participants: i32,
    #[validate(
        custom(function = "validate_https_url"),
        length(max = 2048, message = "Invalid field values")
    )]
    pub meeting_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub course: Course,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> serde_json::Value {
        json!({
            "skill_id": "4c2b1f7e-9a0d-4e8b-8f3a-2d6c5b1e0a97",
            "name": "Morning flow",
            "description": "Gentle vinyasa",
            "start_at": "2025-03-01T08:00:00Z",
            "end_at": "2025-03-01T09:00:00Z",
            "max_participants": 10,
            "meeting_url": "https://meet.example.com/flow"
        })
    }

    #[test]
    fn test_valid_course() {
        let dto: CourseDto = serde_json::from_value(body()).unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_plain_http_meeting_url_rejected() {
        let mut raw = body();
        raw["meeting_url"] = json!("http://meet.example.com/flow");
        let dto: CourseDto = serde_json::from_value(raw).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_bad_skill_id_rejected() {
        let mut raw = body();
        raw["skill_id"] = json!("abc");
        let dto: CourseDto = serde_json::from_value(raw).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_negative_participants_rejected() {
        let mut raw = body();
        raw["max_participants"] = json!(-3);
        assert!(serde_json::from_value::<CourseDto>(raw).is_err());
    }
}
