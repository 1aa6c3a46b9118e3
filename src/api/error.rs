use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::common::ErrorBody;
use crate::storage::StoreError;

pub const MISSING_FIELDS: &str = "Content and sender are required";
pub const LIST_FAILED: &str = "Failed to fetch messages";
pub const CREATE_FAILED: &str = "Failed to send message";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("content and sender are required")]
    MissingFields,

    #[error("failed to fetch messages: {0}")]
    List(#[source] StoreError),

    #[error("failed to send message: {0}")]
    Create(#[source] StoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFields => StatusCode::BAD_REQUEST,
            ApiError::List(_) | ApiError::Create(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Public message; never carries the underlying cause.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::MissingFields => MISSING_FIELDS,
            ApiError::List(_) => LIST_FAILED,
            ApiError::Create(_) => CREATE_FAILED,
        }
    }

    fn log(&self) {
        if self.status_code().is_server_error() {
            log::error!("{self}");
        } else {
            log::debug!("Rejected request: {self}");
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        (
            self.status_code(),
            Json(ErrorBody::new(self.user_message())),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_map_to_generic_server_errors() {
        let err = ApiError::Create(StoreError::Poisoned);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), "Failed to send message");
        assert!(err.to_string().contains("poisoned"));

        let err = ApiError::List(StoreError::InvalidTimestamp(-1));
        assert_eq!(err.user_message(), "Failed to fetch messages");
    }

    #[test]
    fn missing_fields_is_a_client_error() {
        let err = ApiError::MissingFields;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), "Content and sender are required");
    }
}
