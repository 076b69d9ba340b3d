//! StatusReconciler - applies an authoritative gateway status to an order.
//!
//! Shared by webhook processing and manual transaction management so both
//! paths run the identical transition table, settlement semantics, and
//! library-update audit mirroring.

use std::sync::Arc;

use crate::domain::gateway::{GatewayStatus, NotificationError};
use crate::domain::order::{build_plan, decide, Decision, Order, OrderStatus};
use crate::ports::{
    AuditRecorder, CatalogReader, OrderRepository, PaymentContext, SettlementReceipt,
    SettlementStore,
};

/// Outcome of reconciling one resolved status against one order.
#[derive(Debug)]
pub enum ReconcileOutcome {
    /// The order moved to (or re-confirmed) `new_status`.
    Applied {
        new_status: OrderStatus,
        /// Present when the paid side effects ran.
        receipt: Option<SettlementReceipt>,
    },
    /// Unrecognized status vocabulary, or a transition the order's current
    /// status does not allow: nothing changed.
    Held { raw_status: String },
}

/// Applies resolved gateway statuses to orders.
pub struct StatusReconciler {
    orders: Arc<dyn OrderRepository>,
    catalog: Arc<dyn CatalogReader>,
    settlements: Arc<dyn SettlementStore>,
    audit: Arc<dyn AuditRecorder>,
}

impl StatusReconciler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        catalog: Arc<dyn CatalogReader>,
        settlements: Arc<dyn SettlementStore>,
        audit: Arc<dyn AuditRecorder>,
    ) -> Self {
        Self {
            orders,
            catalog,
            settlements,
            audit,
        }
    }

    /// Resolves the transition table against the order's current status and
    /// persists the outcome.
    ///
    /// A paid transition resolves the order's lines, builds the fulfillment
    /// plan, commits it atomically through the settlement store, and mirrors
    /// each grant into the audit trail. Every other transition is a plain
    /// status update. An unrecognized status, or one the current status
    /// forbids, is held: logged, recorded upstream in the audit trail, no
    /// mutation.
    pub async fn apply(
        &self,
        order: &mut Order,
        status: &GatewayStatus,
    ) -> Result<ReconcileOutcome, NotificationError> {
        match status.parsed_amount() {
            Ok(amount) if amount != order.total_amount => {
                tracing::warn!(
                    order_ref = %order.gateway_reference,
                    gateway_amount = %amount,
                    order_amount = %order.total_amount,
                    "Gateway gross amount differs from order total"
                );
            }
            Err(err) => {
                tracing::warn!(
                    order_ref = %order.gateway_reference,
                    gross_amount = %status.gross_amount,
                    error = %err,
                    "Unparseable gross amount on gateway status"
                );
            }
            Ok(_) => {}
        }

        match decide(order.status, status.parsed_status(), status.parsed_fraud()) {
            Decision::Hold => {
                tracing::warn!(
                    order_ref = %order.gateway_reference,
                    current_status = order.status.as_str(),
                    transaction_status = %status.transaction_status,
                    fraud_status = ?status.fraud_status,
                    "Gateway status not applicable, leaving order unchanged"
                );
                Ok(ReconcileOutcome::Held {
                    raw_status: status.transaction_status.clone(),
                })
            }
            Decision::Transition {
                new_status,
                fulfill: false,
            } => {
                self.orders.update_status(&order.id, new_status).await?;
                order.apply_status(new_status);
                tracing::info!(
                    order_ref = %order.gateway_reference,
                    new_status = new_status.as_str(),
                    "Order status updated"
                );
                Ok(ReconcileOutcome::Applied {
                    new_status,
                    receipt: None,
                })
            }
            Decision::Transition {
                new_status,
                fulfill: true,
            } => {
                let lines = self.catalog.resolve_lines(&order.id).await?;
                let plan = build_plan(order, &lines);
                let payment = PaymentContext {
                    transaction_id: status.transaction_id.clone(),
                    payment_type: status.payment_type.clone(),
                };

                let receipt = self.settlements.apply_paid(order, &plan, &payment).await?;
                order.apply_status(new_status);

                // Mirror each grant into the trail. Log-only on failure: the
                // settlement is already committed and must not be reported as
                // failed because the trail was momentarily unavailable.
                for grant in &receipt.grants {
                    if let Err(err) = self
                        .audit
                        .append_library_update(&order.gateway_reference, &grant.grant, grant.created)
                        .await
                    {
                        tracing::error!(
                            order_ref = %order.gateway_reference,
                            error = %err,
                            "Failed to record library_update event"
                        );
                    }
                }

                tracing::info!(
                    order_ref = %order.gateway_reference,
                    grants = receipt.grants.len(),
                    revenue_rows = receipt.revenue_rows_inserted,
                    shipments = receipt.shipments_marked,
                    "Order settled and fulfilled"
                );
                Ok(ReconcileOutcome::Applied {
                    new_status,
                    receipt: Some(receipt),
                })
            }
        }
    }
}
