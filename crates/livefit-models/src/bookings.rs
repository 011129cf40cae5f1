//! Course bookings.
//!
//! A booking is active while `cancelled_at` is null. Each active booking
//! consumes one purchased credit and one seat of the course.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseBooking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub status: String,
    pub booking_at: DateTime<Utc>,
    pub join_at: Option<DateTime<Utc>>,
    pub leave_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// One of the user's bookings joined with its course and coach.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookedCourse {
    pub course_id: Uuid,
    pub name: String,
    pub coach_name: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub meeting_url: String,
    pub status: String,
    pub booking_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserCoursesResponse {
    /// Purchased credits not yet consumed by an active booking
    pub credit_remain: i64,
    /// Active bookings
    pub credit_usage: i64,
    pub course_booking: Vec<BookedCourse>,
}
