//! Success envelopes.
//!
//! Successful responses always carry `"status": "success"`. Mutations that
//! have nothing to return omit `data`; list endpoints that page add a
//! `pagination` block.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::pagination::PaginationMeta;

const SUCCESS: &str = "success";

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: SUCCESS,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// `{"status": "success"}` with no `data` key.
    pub fn ok() -> Self {
        Self {
            status: SUCCESS,
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// `{"status": "success", "data": null}`, used by purchase and booking.
#[derive(Debug, Serialize)]
pub struct NullData {
    pub status: &'static str,
    pub data: Option<()>,
}

impl NullData {
    pub fn new() -> Self {
        Self {
            status: SUCCESS,
            data: None,
        }
    }
}

impl Default for NullData {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoResponse for NullData {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// 201 wrapper for create endpoints.
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(ApiResponse::success(self.0))).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub status: &'static str,
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(data: Vec<T>, pagination: PaginationMeta) -> Self {
        Self {
            status: SUCCESS,
            data,
            pagination,
        }
    }
}

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
