//! API error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use converter::ConversionError;
use thiserror::Error;

/// Errors returned by the conversion endpoint.
///
/// Responses carry the message as plain text.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request is missing or has an invalid field.
    #[error("{0}")]
    Validation(String),

    #[error("Error converting image: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Error converting image: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conversion(e) => StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_bad_request() {
        let err = ApiError::Validation("SVG content is required".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "SVG content is required");
    }

    #[test]
    fn test_conversion_failure_is_server_error() {
        let err = ApiError::from(ConversionError::Load("unexpected end of stream".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Error converting image: Failed to load SVG data: unexpected end of stream"
        );
    }

    #[test]
    fn test_into_response_status() {
        let resp = ApiError::Internal("worker panicked".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
