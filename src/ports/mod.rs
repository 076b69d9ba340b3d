//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world. Adapters implement these ports.
//!
//! - `OrderRepository` - order lookup and non-fulfilling status updates
//! - `CatalogReader` - order-line resolution with bundle expansion
//! - `PaymentGatewayClient` - authoritative status queries and manual ops
//! - `SettlementStore` - atomic application of a paid transition
//! - `AuditRecorder` - append-mostly notification audit trail
//! - `Notifier` - best-effort customer notification dispatch

mod audit_recorder;
mod catalog_reader;
mod gateway_client;
mod notifier;
mod order_repository;
mod settlement_store;

pub use audit_recorder::{AuditOutcome, AuditRecorder};
pub use catalog_reader::CatalogReader;
pub use gateway_client::{GatewayError, ManageAction, PaymentGatewayClient};
pub use notifier::Notifier;
pub use order_repository::OrderRepository;
pub use settlement_store::{GrantOutcome, PaymentContext, SettlementReceipt, SettlementStore};
