//! Notifier port - fire-and-forget customer notification dispatch.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::order::{Order, OrderStatus};

/// Port onto the notification/email dispatcher.
///
/// Best effort: failures are logged by the caller and never block
/// fulfillment.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Announces that an order reached a new status.
    async fn order_status_changed(
        &self,
        order: &Order,
        status: OrderStatus,
    ) -> Result<(), DomainError>;
}
