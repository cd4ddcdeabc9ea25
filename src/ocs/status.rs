//! Semantic status code to HTTP status mapping.

use axum::http::StatusCode;

use crate::ocs::model::{
    STATUS_CODE_FORBIDDEN, STATUS_CODE_NOT_FOUND, STATUS_CODE_OK, STATUS_CODE_SERVER_ERROR,
    STATUS_CODE_UNAUTHORIZED, STATUS_CODE_UNKNOWN_ERROR,
};

/// Translate an OCS `statuscode` into the transport status.
///
/// Known OCS codes are mapped explicitly. Any other code in `200..600` is
/// already an HTTP status and passes through unchanged; everything else is
/// reported as 400.
pub fn http_status(status_code: i32) -> StatusCode {
    match status_code {
        STATUS_CODE_NOT_FOUND => StatusCode::NOT_FOUND,
        STATUS_CODE_SERVER_ERROR | STATUS_CODE_UNKNOWN_ERROR => StatusCode::INTERNAL_SERVER_ERROR,
        STATUS_CODE_UNAUTHORIZED => StatusCode::UNAUTHORIZED,
        STATUS_CODE_OK => StatusCode::OK,
        STATUS_CODE_FORBIDDEN => StatusCode::FORBIDDEN,
        200..=599 => {
            StatusCode::from_u16(status_code as u16).unwrap_or(StatusCode::BAD_REQUEST)
        }
        _ => StatusCode::BAD_REQUEST,
    }
}
