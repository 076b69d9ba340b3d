//! Order status vocabulary.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// `pending -> {paid, failed, expired, challenge}`; `challenge -> {paid,
/// failed}` via manual or rule-based fraud resolution. `paid`, `failed`, and
/// `expired` are terminal for the reconciliation engine (refund and cancel
/// are separate authorized operations, not automatic transitions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Challenge,
    Failed,
    Expired,
}

impl OrderStatus {
    /// Parses a persisted status string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "challenge" => Some(Self::Challenge),
            "failed" => Some(Self::Failed),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    /// The persisted representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Challenge => "challenge",
            Self::Failed => "failed",
            Self::Expired => "expired",
        }
    }

    /// Whether the reconciliation engine considers this status final.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Failed | Self::Expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_strings() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Paid,
            OrderStatus::Challenge,
            OrderStatus::Failed,
            OrderStatus::Expired,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_strings_are_rejected() {
        assert_eq!(OrderStatus::parse("refunded"), None);
        assert_eq!(OrderStatus::parse(""), None);
    }

    #[test]
    fn terminal_states_are_marked() {
        assert!(OrderStatus::Paid.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
        assert!(OrderStatus::Expired.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Challenge.is_terminal());
    }
}
