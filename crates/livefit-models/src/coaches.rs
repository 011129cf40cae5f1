//! Coach profiles.
//!
//! A coach row is created when an account is promoted and shares its
//! lifetime with the user row (`coaches.user_id` is unique).

use chrono::{DateTime, Utc};
use livefit_core::validation::{non_negative_integer, validate_https_url, validate_not_blank};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Coach {
    pub id: Uuid,
    pub user_id: Uuid,
    pub experience_years: i32,
    pub description: String,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the public coach listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CoachListItem {
    /// Coach id
    pub id: Uuid,
    pub name: String,
    pub experience_years: i32,
    pub description: String,
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CoachUserInfo {
    pub name: String,
    pub role: String,
}

/// `{user, coach}` returned by promotion and the coach detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoachWithUser {
    pub user: CoachUserInfo,
    pub coach: Coach,
}

/// Body for promoting a user and for a coach editing their own profile.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CoachProfileDto {
    #[serde(deserialize_with = "non_negative_integer")]
    #[schema(example = 5, minimum = 0)]
    pub experience_years: i32,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,
    /// Must start with `https` when present
    #[serde(default)]
    #[validate(custom(function = "validate_https_url"), length(max = 2048))]
    pub profile_image_url: Option<String>,
}
