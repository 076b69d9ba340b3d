//! HTTP DTOs for the payment notification API.
//!
//! The acknowledgement shape `{success, message}` is part of the gateway
//! contract: a 2xx with `success: true` stops redelivery, anything else
//! triggers the gateway's retry schedule.

use serde::Serialize;

/// Acknowledgement returned to the gateway for a processed notification.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub success: bool,
    pub message: String,
}

impl NotificationResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Response for a manual transaction-management action.
#[derive(Debug, Clone, Serialize)]
pub struct ManageTransactionResponse {
    pub success: bool,
    pub order_ref: String,
    /// The order status after the action, if one was applied.
    pub status: Option<String>,
}

/// Health probe response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
