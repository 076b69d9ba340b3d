//! PostgreSQL adapters for the persistence ports.

mod audit_recorder;
mod catalog_reader;
mod order_repository;
mod settlement_store;

pub use audit_recorder::PostgresAuditRecorder;
pub use catalog_reader::PostgresCatalogReader;
pub use order_repository::PostgresOrderRepository;
pub use settlement_store::PostgresSettlementStore;
