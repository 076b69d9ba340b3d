//! Error types for gateway notification processing.
//!
//! Defines all error conditions that can occur while reconciling an inbound
//! notification, with HTTP status mapping and retryability semantics. The
//! gateway retries delivery on non-2xx responses, so the mapping controls
//! its retry behavior.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Errors that occur during notification processing.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Signature verification failed (bad digest or missing required field).
    #[error("Invalid signature")]
    InvalidSignature,

    /// The order reference does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// The status-query call to the gateway failed.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),
}

impl NotificationError {
    /// Returns true if the gateway should retry delivering this notification.
    ///
    /// Retryable errors are temporary failures that may succeed on a later
    /// attempt; the whole transition is re-runnable because fulfillment is
    /// idempotent and failed transactions roll back completely.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            NotificationError::Gateway(_) | NotificationError::Database(_)
        )
    }

    /// Maps the error to an HTTP status code.
    ///
    /// - 2xx: acknowledged, no retry
    /// - 4xx: permanent rejection, no retry
    /// - 5xx: temporary failure, gateway will retry
    pub fn status_code(&self) -> StatusCode {
        match self {
            NotificationError::InvalidSignature => StatusCode::UNAUTHORIZED,
            NotificationError::OrderNotFound(_) => StatusCode::NOT_FOUND,
            NotificationError::Gateway(_) => StatusCode::BAD_GATEWAY,
            NotificationError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for NotificationError {
    fn from(err: DomainError) -> Self {
        NotificationError::Database(err.to_string())
    }
}
