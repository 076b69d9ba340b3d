//! ManageTransactionHandler - manual back-office transaction actions.
//!
//! Approve/deny a challenged payment, cancel, expire, or refund. The gateway
//! executes the action and returns the resulting transaction status, which
//! then flows through the same reconciler as a webhook so the order ends up
//! exactly where an equivalent notification would have put it.

use std::sync::Arc;

use crate::domain::gateway::NotificationError;
use crate::ports::{AuditOutcome, AuditRecorder, ManageAction, OrderRepository, PaymentGatewayClient};

use super::reconcile::{ReconcileOutcome, StatusReconciler};

/// A manual action against one transaction.
#[derive(Debug, Clone)]
pub struct ManageTransactionCommand {
    pub order_ref: String,
    pub action: ManageAction,
}

/// Handler for manual gateway transaction management.
pub struct ManageTransactionHandler {
    orders: Arc<dyn OrderRepository>,
    gateway: Arc<dyn PaymentGatewayClient>,
    audit: Arc<dyn AuditRecorder>,
    reconciler: StatusReconciler,
}

impl ManageTransactionHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        gateway: Arc<dyn PaymentGatewayClient>,
        audit: Arc<dyn AuditRecorder>,
        reconciler: StatusReconciler,
    ) -> Self {
        Self {
            orders,
            gateway,
            audit,
            reconciler,
        }
    }

    pub async fn handle(
        &self,
        cmd: ManageTransactionCommand,
    ) -> Result<ReconcileOutcome, NotificationError> {
        let payload = serde_json::json!({
            "manual_action": cmd.action.as_path(),
            "order_id": cmd.order_ref,
        });
        let event_id = self
            .audit
            .append_received(Some(&cmd.order_ref), &payload)
            .await?;

        let Some(mut order) = self.orders.find_by_reference(&cmd.order_ref).await? else {
            self.amend(&event_id, AuditOutcome::RejectedOrderNotFound, None)
                .await;
            return Err(NotificationError::OrderNotFound(cmd.order_ref));
        };

        let status = match self.gateway.manage(&cmd.order_ref, cmd.action).await {
            Ok(status) => status,
            Err(err) => {
                let detail = err.to_string();
                self.amend(&event_id, AuditOutcome::Error, Some(&detail)).await;
                return Err(NotificationError::Gateway(detail));
            }
        };

        let outcome = match self.reconciler.apply(&mut order, &status).await {
            Ok(outcome) => outcome,
            Err(err) => {
                let detail = err.to_string();
                self.amend(&event_id, AuditOutcome::Error, Some(&detail)).await;
                return Err(err);
            }
        };

        self.amend(&event_id, AuditOutcome::Processed, None).await;
        tracing::info!(
            order_ref = %cmd.order_ref,
            action = cmd.action.as_path(),
            "Manual transaction action applied"
        );
        Ok(outcome)
    }

    async fn amend(
        &self,
        event_id: &crate::domain::foundation::AuditEventId,
        outcome: AuditOutcome,
        detail: Option<&str>,
    ) {
        if let Err(err) = self
            .audit
            .record_outcome(event_id, outcome, detail, None)
            .await
        {
            tracing::error!(
                outcome = outcome.as_str(),
                error = %err,
                "Failed to amend audit event outcome"
            );
        }
    }
}
