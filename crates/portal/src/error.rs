//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::fulfillment::FulfillmentError;

/// Application-level error type for the portal.
#[derive(Debug, Error)]
pub enum AppError {
    /// Fulfillment API operation failed.
    #[error("Fulfillment error: {0}")]
    Fulfillment(#[from] FulfillmentError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Fulfillment(err) => match err {
                FulfillmentError::NotFound(_) => StatusCode::NOT_FOUND,
                FulfillmentError::NotAuthorized { .. } => StatusCode::FORBIDDEN,
                FulfillmentError::Http(_)
                | FulfillmentError::Status { .. }
                | FulfillmentError::Parse(_) => StatusCode::BAD_GATEWAY,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Upstream transport details stay server-side.
    fn message(&self) -> String {
        match self {
            Self::Fulfillment(err) => match err {
                FulfillmentError::NotFound(reference) => {
                    format!("Order \"{reference}\" was not found. Check the order number.")
                }
                FulfillmentError::NotAuthorized { order, .. } => {
                    format!("Order {order} is not associated with the provided email.")
                }
                FulfillmentError::Http(_)
                | FulfillmentError::Status { .. }
                | FulfillmentError::Parse(_) => "Fulfillment service error".to_string(),
            },
            Self::Internal(_) => "Internal server error".to_string(),
            Self::BadRequest(_) => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side failures to Sentry
        let is_server_error = matches!(
            &self,
            Self::Internal(_)
                | Self::Fulfillment(
                    FulfillmentError::Http(_)
                        | FulfillmentError::Status { .. }
                        | FulfillmentError::Parse(_)
                )
        );
        if is_server_error {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = Json(serde_json::json!({ "error": self.message() }));
        (self.status(), body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
