//! Inbound payment-gateway notification payload.
//!
//! Every field is optional at the parse level: a malformed notification must
//! still be auditable and rejected by the signature check rather than by
//! deserialization. The payload is only a trigger to re-check authoritative
//! status, never a source of truth for business decisions.

use serde::{Deserialize, Serialize};

/// Raw webhook notification as posted by the payment gateway.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GatewayNotification {
    /// Merchant order reference.
    #[serde(default)]
    pub order_id: Option<String>,

    /// Gateway status code ("200", "201", ...).
    #[serde(default)]
    pub status_code: Option<String>,

    /// Gross amount as a decimal-formatted string.
    #[serde(default)]
    pub gross_amount: Option<String>,

    /// Hex-encoded signature over (order_id, status_code, gross_amount, key).
    #[serde(default)]
    pub signature_key: Option<String>,

    /// Claimed transaction status. Untrusted; re-resolved via the status API.
    #[serde(default)]
    pub transaction_status: Option<String>,

    /// Claimed fraud status (card flows only).
    #[serde(default)]
    pub fraud_status: Option<String>,

    /// Payment method ("credit_card", "bank_transfer", "cstore", ...).
    #[serde(default)]
    pub payment_type: Option<String>,

    /// Gateway-side transaction identifier.
    #[serde(default)]
    pub transaction_id: Option<String>,

    /// Transaction timestamp as reported by the gateway.
    #[serde(default)]
    pub transaction_time: Option<String>,

    /// ISO currency code.
    #[serde(default)]
    pub currency: Option<String>,
}

impl GatewayNotification {
    /// Returns the order reference, if present and non-empty.
    pub fn order_ref(&self) -> Option<&str> {
        self.order_id.as_deref().filter(|s| !s.is_empty())
    }
}
