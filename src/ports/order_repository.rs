//! OrderRepository port - order lookup and status updates.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrderId};
use crate::domain::order::{Order, OrderStatus};

/// Port for reading orders and applying non-fulfilling status updates.
///
/// Orders are created by the checkout flow (outside this engine) and never
/// deleted. Paid transitions go through the settlement store instead so the
/// status update commits atomically with its side effects.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Finds an order by its gateway reference.
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Order>, DomainError>;

    /// Updates an order's status (pending, challenge, failed, expired).
    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), DomainError>;
}
