//! Foundation value objects shared across the domain.

mod errors;
mod ids;
mod money;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    AuditEventId, BundleId, CustomerId, OrderId, OrderLineId, ProductId, PublisherId,
};
pub use money::Money;
pub use timestamp::Timestamp;
