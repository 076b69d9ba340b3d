//! Order aggregate and order lines.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BundleId, CustomerId, Money, OrderId, OrderLineId, ProductId, Timestamp,
};

use super::status::OrderStatus;

/// A single checkout attempt.
///
/// Created in `pending` by the checkout flow, mutated only by the
/// reconciliation engine, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Reference shared with the payment gateway (`order_id` on the wire).
    pub gateway_reference: String,
    pub customer_id: CustomerId,
    pub status: OrderStatus,
    pub currency: String,
    pub total_amount: Money,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Applies a resolved status, touching the update timestamp.
    pub fn apply_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Timestamp::now();
    }
}

/// What an order line purchases: a single product or a bundle, mutually
/// exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItem {
    Product(ProductId),
    Bundle(BundleId),
}

/// One purchased item within an order. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub order_id: OrderId,
    pub item: LineItem,
    pub unit_price: Money,
    pub quantity: u32,
}

impl OrderLine {
    /// The line total: unit price times quantity, `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.checked_times(self.quantity)
    }
}
