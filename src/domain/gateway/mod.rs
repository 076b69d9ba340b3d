//! Payment-gateway domain: notification payloads, signature verification,
//! and the authoritative transaction-status vocabulary.

mod errors;
mod notification;
mod signature;
mod status;

pub use errors::NotificationError;
pub use notification::GatewayNotification;
pub use signature::SignatureVerifier;
pub use status::{FraudStatus, GatewayStatus, TransactionStatus, VirtualAccount};
