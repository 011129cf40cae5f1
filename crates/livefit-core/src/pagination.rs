//! Page-based pagination for list endpoints.
//!
//! List endpoints take `per` (items per page) and `page` (1-indexed) as query
//! strings. Both are required: a missing or blank value is a field error,
//! while a value that is not a positive integer is a range error. The two
//! failures carry different messages, so [`PageQuery::resolve`] reports which
//! one happened.
//!
//! # Example
//!
//! ```ignore
//! // GET /api/coaches?per=10&page=2
//! let (per, page) = query.resolve()?;
//! let offset = PageQuery::offset(per, page);
//! let meta = PaginationMeta::new(total, page, per);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::validation::{is_not_valid_string, parse_positive_int};

/// Why a `per`/`page` pair was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    /// One of the parameters is missing or blank.
    Missing,
    /// One of the parameters is not a positive integer.
    NotPositive,
}

/// Query parameters for page-based listing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Items per page (positive integer)
    pub per: Option<String>,
    /// Page number, starting at 1
    pub page: Option<String>,
}

impl PageQuery {
    /// Validates and returns `(per, page)`.
    pub fn resolve(&self) -> Result<(i64, i64), PageError> {
        if is_not_valid_string(self.per.as_deref()) || is_not_valid_string(self.page.as_deref()) {
            return Err(PageError::Missing);
        }

        let per = self.per.as_deref().and_then(parse_positive_int);
        let page = self.page.as_deref().and_then(parse_positive_int);

        match (per, page) {
            (Some(per), Some(page)) => Ok((per, page)),
            _ => Err(PageError::NotPositive),
        }
    }

    /// Number of rows to skip for the given page.
    #[must_use]
    pub fn offset(per: i64, page: i64) -> i64 {
        (page - 1).saturating_mul(per)
    }
}

/// Pagination block included in paged list responses.
///
/// ```json
/// { "total": 11, "current_page": 2, "per_page": 5, "total_pages": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: i64,
    pub current_page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    #[must_use]
    pub fn new(total: i64, current_page: i64, per_page: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };

        Self {
            total,
            current_page,
            per_page,
            total_pages,
        }
    }
}
