//! ProcessNotificationHandler - command handler for inbound gateway webhooks.
//!
//! Pipeline: audit append -> signature verification -> order lookup ->
//! authoritative status fetch -> reconciliation (transition, atomic side
//! effects, grant mirroring) -> audit amend -> best-effort notification.
//! Every invocation is treated as possibly-duplicate and possibly-stale;
//! decisions are made only on the freshly fetched status, never on the
//! pushed payload.

use std::sync::Arc;

use crate::domain::gateway::{GatewayNotification, NotificationError, SignatureVerifier};
use crate::domain::order::OrderStatus;
use crate::ports::{AuditOutcome, AuditRecorder, Notifier, OrderRepository, PaymentGatewayClient};

use super::reconcile::{ReconcileOutcome, StatusReconciler};

/// Command carrying one raw webhook delivery.
#[derive(Debug, Clone)]
pub struct ProcessNotificationCommand {
    /// The HTTP body exactly as received.
    pub body: Vec<u8>,
}

/// Result of processing one notification.
#[derive(Debug)]
pub enum ProcessNotificationResult {
    /// The transition table produced a status (fulfilled on paid).
    StatusApplied {
        order_ref: String,
        new_status: OrderStatus,
        fulfilled: bool,
    },
    /// Unrecognized transaction status: acknowledged, order unchanged.
    Held { raw_status: String },
}

/// Handler for inbound payment-gateway notifications.
pub struct ProcessNotificationHandler {
    verifier: SignatureVerifier,
    orders: Arc<dyn OrderRepository>,
    gateway: Arc<dyn PaymentGatewayClient>,
    audit: Arc<dyn AuditRecorder>,
    notifier: Arc<dyn Notifier>,
    reconciler: StatusReconciler,
}

impl ProcessNotificationHandler {
    pub fn new(
        verifier: SignatureVerifier,
        orders: Arc<dyn OrderRepository>,
        gateway: Arc<dyn PaymentGatewayClient>,
        audit: Arc<dyn AuditRecorder>,
        notifier: Arc<dyn Notifier>,
        reconciler: StatusReconciler,
    ) -> Self {
        Self {
            verifier,
            orders,
            gateway,
            audit,
            notifier,
            reconciler,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessNotificationCommand,
    ) -> Result<ProcessNotificationResult, NotificationError> {
        // Parse leniently: a malformed body must still be auditable, and the
        // signature check fails closed on whatever is missing.
        let payload: serde_json::Value = serde_json::from_slice(&cmd.body).unwrap_or_else(|_| {
            serde_json::json!({ "raw_body": String::from_utf8_lossy(&cmd.body) })
        });
        let notification: GatewayNotification =
            serde_json::from_value(payload.clone()).unwrap_or_default();

        // 1. Forensic append before any verification.
        let event_id = self
            .audit
            .append_received(notification.order_ref(), &payload)
            .await?;

        // 2. Authenticate. Nothing state-changing may run before this passes.
        if !self.verifier.verify(&notification) {
            tracing::warn!(
                order_ref = ?notification.order_ref(),
                "Rejected notification with invalid signature"
            );
            self.amend(
                &event_id,
                AuditOutcome::RejectedInvalidSignature,
                None,
                None,
            )
            .await;
            return Err(NotificationError::InvalidSignature);
        }
        let order_ref = notification.order_ref().unwrap_or_default().to_string();

        // 3. The order must exist before we spend a gateway round trip.
        let Some(mut order) = self.orders.find_by_reference(&order_ref).await? else {
            self.amend(&event_id, AuditOutcome::RejectedOrderNotFound, None, None)
                .await;
            return Err(NotificationError::OrderNotFound(order_ref));
        };

        // 4. Re-resolve authoritative status; the push payload is untrusted.
        let status = match self.gateway.fetch_status(&order_ref).await {
            Ok(status) => status,
            Err(err) => {
                let detail = err.to_string();
                self.amend(&event_id, AuditOutcome::Error, Some(&detail), None)
                    .await;
                return Err(NotificationError::Gateway(detail));
            }
        };
        let snapshot = serde_json::to_value(&status).ok();

        // 5. Transition and side effects (atomic inside the settlement store).
        let outcome = match self.reconciler.apply(&mut order, &status).await {
            Ok(outcome) => outcome,
            Err(err) => {
                let detail = err.to_string();
                self.amend(
                    &event_id,
                    AuditOutcome::Error,
                    Some(&detail),
                    snapshot.as_ref(),
                )
                .await;
                return Err(err);
            }
        };

        // 6. Amend the audit outcome and notify.
        match outcome {
            ReconcileOutcome::Applied {
                new_status,
                receipt,
            } => {
                let fulfilled = receipt.is_some();
                self.amend(&event_id, AuditOutcome::Processed, None, snapshot.as_ref())
                    .await;

                if let Err(err) = self.notifier.order_status_changed(&order, new_status).await {
                    tracing::warn!(
                        order_ref = %order_ref,
                        error = %err,
                        "Notification dispatch failed (non-blocking)"
                    );
                }

                Ok(ProcessNotificationResult::StatusApplied {
                    order_ref,
                    new_status,
                    fulfilled,
                })
            }
            ReconcileOutcome::Held { raw_status } => {
                self.amend(&event_id, AuditOutcome::Processed, None, snapshot.as_ref())
                    .await;
                Ok(ProcessNotificationResult::Held { raw_status })
            }
        }
    }

    /// Amends the audit event, logging rather than failing on error: the
    /// outcome write is diagnostic, and the caller's result must not change
    /// because the trail was momentarily unavailable.
    async fn amend(
        &self,
        event_id: &crate::domain::foundation::AuditEventId,
        outcome: AuditOutcome,
        detail: Option<&str>,
        snapshot: Option<&serde_json::Value>,
    ) {
        if let Err(err) = self
            .audit
            .record_outcome(event_id, outcome, detail, snapshot)
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
