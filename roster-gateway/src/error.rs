//! Error envelope for the gateway crate.

use axum::{
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::ValidationErrors;
use roster_store::StoreError;
use serde::Serialize;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The request body or path is empty or malformed.
    #[error("{0}")]
    InvalidRequest(String),

    /// The request body exceeds the accepted size.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The decoded record failed one or more field constraints.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// An error propagated from the record store, including lookups of
    /// unknown ids.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status reported for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::InvalidRequest(rejection.body_text())
        }
    }
}

/// JSON body of every failed request: `{"status":"Error","error":"..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub status: &'static str,
    pub error: String,
}

impl ErrorEnvelope {
    /// Wrap a human-readable message.
    pub fn new(error: impl Into<String>) -> Self {
        Self { status: "Error", error: error.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        (status, Json(ErrorEnvelope::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{NewStudent, StudentId};

    #[test]
    fn api_error_status_codes_map_correctly() {
        let bad_req = ApiError::InvalidRequest("empty body".to_owned());
        assert_eq!(bad_req.into_response().status(), StatusCode::BAD_REQUEST);

        let invalid = match NewStudent::new("", "ann@example.com", 1).validate() {
            Err(e) => ApiError::from(e),
            Ok(()) => panic!("empty name must fail validation"),
        };
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let too_large = ApiError::PayloadTooLarge("length limit exceeded".to_owned());
        assert_eq!(too_large.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn api_error_store_variants_return_500() {
        let not_found = ApiError::from(StoreError::NotFound(StudentId::new(2)));
        assert_eq!(
            not_found.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "unknown ids are reported as store failures"
        );

        let storage = ApiError::from(StoreError::Storage("disk full".to_owned()));
        assert_eq!(storage.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn api_error_display_is_the_bare_message() {
        let err = ApiError::from(StoreError::NotFound(StudentId::new(5)));
        assert_eq!(err.to_string(), "no student found with id 5");
    }

    #[test]
    fn error_envelope_serializes_status_and_error() {
        let json = match serde_json::to_string(&ErrorEnvelope::new("empty body")) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, r#"{"status":"Error","error":"empty body"}"#);
    }
}
