//! Notification adapters.
//!
//! `TracingNotifier` logs status-change notifications instead of sending
//! them; the email/push dispatcher plugs in behind the same port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::order::{Order, OrderStatus};
use crate::ports::Notifier;

/// Notifier that records dispatches in the log stream.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn order_status_changed(
        &self,
        order: &Order,
        status: OrderStatus,
    ) -> Result<(), DomainError> {
        tracing::info!(
            order_ref = %order.gateway_reference,
            customer_id = %order.customer_id,
            status = status.as_str(),
            "Dispatching order status notification"
        );
        Ok(())
    }
}
