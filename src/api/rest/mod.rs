//! REST API module for HTTP endpoints
//!
//! - `POST /api/scan` - Record a scan
//! - `GET /api/history` - History of one packaging unit
//! - `GET /api/summary/dashboard` - Today / this-month counts
//! - `GET /api/ping` - Liveness probe

pub mod history;
pub mod scans;
pub mod summary;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::error::ScanError;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub ok: bool,
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            ok: false,
            error: message.into(),
            code: code.to_string(),
            field: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        let status = if err.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %err, "storage failure");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let mut api_error = Self::new(status, err.code(), err.to_string());
        if let ScanError::MissingField(field) = &err {
            api_error.field = Some(field.to_string());
        }
        api_error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
