//! Credit packages and purchases.
//!
//! Prices are whole currency units.

use chrono::{DateTime, Utc};
use livefit_core::validation::{non_negative_integer, validate_not_blank};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CreditPackage {
    pub id: Uuid,
    pub name: String,
    pub credit_amount: i32,
    pub price: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CreditPackageSummary {
    pub id: Uuid,
    pub name: String,
    pub credit_amount: i32,
    pub price: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCreditPackageDto {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 50, message = "Invalid field values")
    )]
    #[schema(example = "7 classes")]
    pub name: String,
    #[serde(deserialize_with = "non_negative_integer")]
    #[schema(example = 7, minimum = 0)]
    pub credit_amount: i32,
    #[serde(deserialize_with = "non_negative_integer")]
    #[schema(example = 1400, minimum = 0)]
    pub price: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CreditPurchase {
    pub id: Uuid,
    pub user_id: Uuid,
    pub credit_package_id: Uuid,
    pub purchased_credits: i32,
    pub price_paid: i32,
    pub purchase_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// One of the user's purchases joined with the package name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PurchaseHistoryItem {
    pub purchased_credits: i32,
    pub price_paid: i32,
    pub name: String,
    pub purchase_at: DateTime<Utc>,
}
