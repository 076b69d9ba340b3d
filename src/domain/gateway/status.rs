//! Normalized transaction status as resolved from the gateway status API.
//!
//! The status-query response is the authoritative source of truth for every
//! business decision; the inbound push notification only triggers a re-check.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, ValidationError};

/// The gateway's fixed transaction-status vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Card funds reserved; final state depends on fraud review.
    Capture,
    /// Funds have cleared.
    Settlement,
    /// Awaiting customer action (e.g., bank transfer not yet made).
    Pending,
    /// Rejected by the gateway or issuing bank.
    Deny,
    /// Cancelled before completion.
    Cancel,
    /// Payment window elapsed.
    Expire,
    /// Gateway-side failure.
    Failure,
}

impl TransactionStatus {
    /// Parses a transaction status string. Unrecognized values return `None`
    /// so callers can log-and-hold rather than guess.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "capture" => Some(Self::Capture),
            "settlement" => Some(Self::Settlement),
            "pending" => Some(Self::Pending),
            "deny" => Some(Self::Deny),
            "cancel" => Some(Self::Cancel),
            "expire" => Some(Self::Expire),
            "failure" => Some(Self::Failure),
            _ => None,
        }
    }

    /// The wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Capture => "capture",
            Self::Settlement => "settlement",
            Self::Pending => "pending",
            Self::Deny => "deny",
            Self::Cancel => "cancel",
            Self::Expire => "expire",
            Self::Failure => "failure",
        }
    }
}

/// Fraud-review status, present only for card-capture flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FraudStatus {
    Accept,
    Deny,
    Challenge,
}

impl FraudStatus {
    /// Parses a fraud status string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "accept" => Some(Self::Accept),
            "deny" => Some(Self::Deny),
            "challenge" => Some(Self::Challenge),
            _ => None,
        }
    }

    /// The wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Deny => "deny",
            Self::Challenge => "challenge",
        }
    }
}

/// Virtual-account details for bank-transfer payments.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VirtualAccount {
    pub bank: String,
    pub va_number: String,
}

/// Normalized, authoritative transaction status record.
///
/// Raw status strings are kept alongside the parsed vocabulary so that
/// unrecognized values survive into the audit trail unmodified.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayStatus {
    /// Merchant order reference.
    pub order_id: String,

    /// Gateway-side transaction identifier.
    #[serde(default)]
    pub transaction_id: String,

    /// Raw transaction status string.
    pub transaction_status: String,

    /// Raw fraud status string (card-capture flows only).
    #[serde(default)]
    pub fraud_status: Option<String>,

    /// Gross amount as a decimal-formatted string.
    #[serde(default)]
    pub gross_amount: String,

    /// ISO currency code.
    #[serde(default)]
    pub currency: String,

    /// Payment method.
    #[serde(default)]
    pub payment_type: String,

    /// Transaction timestamp as reported by the gateway.
    #[serde(default)]
    pub transaction_time: Option<String>,

    /// Virtual-account numbers (bank-transfer payments).
    #[serde(default)]
    pub va_numbers: Vec<VirtualAccount>,

    /// Convenience-store code (over-the-counter payments).
    #[serde(default)]
    pub store: Option<String>,

    /// Instruction PDF reference, when the gateway provides one.
    #[serde(default)]
    pub pdf_url: Option<String>,
}

impl GatewayStatus {
    /// Parses the transaction status into the fixed vocabulary.
    pub fn parsed_status(&self) -> Option<TransactionStatus> {
        TransactionStatus::parse(&self.transaction_status)
    }

    /// Parses the fraud status, when present.
    pub fn parsed_fraud(&self) -> Option<FraudStatus> {
        self.fraud_status.as_deref().and_then(FraudStatus::parse)
    }

    /// Parses the gross amount from its decimal wire format.
    pub fn parsed_amount(&self) -> Result<Money, ValidationError> {
        Money::parse_decimal(&self.gross_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_status_roundtrips() {
        for status in [
            TransactionStatus::Capture,
            TransactionStatus::Settlement,
            TransactionStatus::Pending,
            TransactionStatus::Deny,
            TransactionStatus::Cancel,
            TransactionStatus::Expire,
            TransactionStatus::Failure,
        ] {
            assert_eq!(TransactionStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unrecognized_status_parses_to_none() {
        assert_eq!(TransactionStatus::parse("refund"), None);
        assert_eq!(TransactionStatus::parse(""), None);
        assert_eq!(TransactionStatus::parse("SETTLEMENT"), None);
    }

    #[test]
    fn fraud_status_roundtrips() {
        for status in [FraudStatus::Accept, FraudStatus::Deny, FraudStatus::Challenge] {
            assert_eq!(FraudStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(FraudStatus::parse("review"), None);
    }

    #[test]
    fn deserializes_bank_transfer_response() {
        let json = r#"{
            "order_id": "ORDER-17",
            "transaction_id": "f82a2c1b",
            "transaction_status": "settlement",
            "gross_amount": "120000.00",
            "currency": "IDR",
            "payment_type": "bank_transfer",
            "va_numbers": [{"bank": "bca", "va_number": "812345678"}]
        }"#;

        let status: GatewayStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.parsed_status(), Some(TransactionStatus::Settlement));
        assert!(status.parsed_fraud().is_none());
        assert_eq!(status.parsed_amount().unwrap(), Money::from_cents(12_000_000));
        assert_eq!(status.va_numbers[0].bank, "bca");
    }

    #[test]
    fn unparseable_gross_amount_is_an_error() {
        let json = r#"{"order_id": "O-1", "transaction_status": "settlement", "gross_amount": "n/a"}"#;
        let status: GatewayStatus = serde_json::from_str(json).unwrap();
        assert!(status.parsed_amount().is_err());
    }

    #[test]
    fn keeps_raw_unrecognized_status() {
        let json = r#"{"order_id": "O-1", "transaction_status": "chargeback"}"#;
        let status: GatewayStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.parsed_status(), None);
        assert_eq!(status.transaction_status, "chargeback");
    }
}
