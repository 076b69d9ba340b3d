//! PaymentGatewayClient port - outbound calls to the payment gateway.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::gateway::GatewayStatus;

/// Errors from the gateway HTTP API.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport-level failure (connect, timeout).
    #[error("Gateway request failed: {0}")]
    Http(String),

    /// The gateway returned a non-success status code.
    #[error("Gateway returned HTTP {code}: {body}")]
    UnexpectedStatus { code: u16, body: String },

    /// The gateway does not know this transaction.
    #[error("Transaction not found for order {0}")]
    TransactionNotFound(String),

    /// The response body could not be decoded.
    #[error("Failed to decode gateway response: {0}")]
    Decode(String),
}

/// Manual transaction-management actions exposed by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageAction {
    /// Accept a challenged card transaction.
    Approve,
    /// Reject a challenged card transaction.
    Deny,
    /// Cancel before settlement.
    Cancel,
    /// Expire a pending transaction.
    Expire,
    /// Refund a settled transaction.
    Refund,
}

impl ManageAction {
    /// The gateway API path segment for this action.
    pub fn as_path(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Deny => "deny",
            Self::Cancel => "cancel",
            Self::Expire => "expire",
            Self::Refund => "refund",
        }
    }
}

/// Port for the payment gateway's transaction API.
///
/// The status query is the authoritative source of truth; inbound
/// notifications are never acted on directly.
#[async_trait]
pub trait PaymentGatewayClient: Send + Sync {
    /// Fetches the current, authoritative transaction status.
    async fn fetch_status(&self, order_ref: &str) -> Result<GatewayStatus, GatewayError>;

    /// Executes a manual management action and returns the resulting status.
    async fn manage(
        &self,
        order_ref: &str,
        action: ManageAction,
    ) -> Result<GatewayStatus, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manage_action_paths_are_stable() {
        assert_eq!(ManageAction::Approve.as_path(), "approve");
        assert_eq!(ManageAction::Deny.as_path(), "deny");
        assert_eq!(ManageAction::Cancel.as_path(), "cancel");
        assert_eq!(ManageAction::Expire.as_path(), "expire");
        assert_eq!(ManageAction::Refund.as_path(), "refund");
    }
}
