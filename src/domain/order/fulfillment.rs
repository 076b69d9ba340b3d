//! Fulfillment planning for a paid order.
//!
//! Builds the complete set of side effects for a paid transition as one pure
//! value: library grants (digital products only, bundles expanded, distinct
//! per product), per-publisher revenue shares, and the shipment trigger. The
//! plan is applied atomically by the settlement store.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::ResolvedLine;
use crate::domain::foundation::{CustomerId, Money, OrderId, ProductId, PublisherId};

use super::order::Order;

/// A single library entitlement to create (or confirm) for the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryGrant {
    pub customer_id: CustomerId,
    pub product_id: ProductId,
}

/// One publisher's share of a settled order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueShare {
    pub publisher_id: PublisherId,
    pub amount: Money,
}

/// Everything a paid transition must persist, in one value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentPlan {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub grants: Vec<LibraryGrant>,
    pub revenue_shares: Vec<RevenueShare>,
    /// True when any line contains a physical product.
    pub trigger_shipment: bool,
}

/// Builds the fulfillment plan for an order from its resolved lines.
///
/// - Grants: one per distinct digital product across all lines, bundle
///   constituents included. Physical products get no library record.
/// - Revenue: each line's total accumulates onto the line's publisher;
///   exactly one share per publisher. Lines without a publisher earn none.
/// - Shipment: triggered if any resolved product is physical.
pub fn build_plan(order: &Order, lines: &[ResolvedLine]) -> FulfillmentPlan {
    let mut grants: Vec<LibraryGrant> = Vec::new();
    let mut revenue_shares: Vec<RevenueShare> = Vec::new();
    let mut trigger_shipment = false;

    for line in lines {
        for product in &line.products {
            if product.format.is_physical() {
                trigger_shipment = true;
                continue;
            }
            let grant = LibraryGrant {
                customer_id: order.customer_id,
                product_id: product.id,
            };
            if !grants.contains(&grant) {
                grants.push(grant);
            }
        }

        if let Some(publisher_id) = line.publisher_id {
            match revenue_shares
                .iter_mut()
                .find(|share| share.publisher_id == publisher_id)
            {
                Some(share) => {
                    share.amount = share
                        .amount
                        .checked_add(line.line_total)
                        .unwrap_or(share.amount);
                }
                None => revenue_shares.push(RevenueShare {
                    publisher_id,
                    amount: line.line_total,
                }),
            }
        }
    }

    FulfillmentPlan {
        order_id: order.id,
        customer_id: order.customer_id,
        grants,
        revenue_shares,
        trigger_shipment,
    }
}
