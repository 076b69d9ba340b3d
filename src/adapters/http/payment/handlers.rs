//! HTTP handlers for payment reconciliation endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::payment::{
    ManageTransactionCommand, ManageTransactionHandler, ProcessNotificationCommand,
    ProcessNotificationHandler, ProcessNotificationResult, ReconcileOutcome, StatusReconciler,
};
use crate::domain::gateway::{NotificationError, SignatureVerifier};
use crate::ports::{
    AuditRecorder, CatalogReader, ManageAction, Notifier, OrderRepository, PaymentGatewayClient,
    SettlementStore,
};

use super::dto::{HealthResponse, ManageTransactionResponse, NotificationResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; every dependency is Arc-wrapped.
#[derive(Clone)]
pub struct PaymentAppState {
    pub verifier: SignatureVerifier,
    pub orders: Arc<dyn OrderRepository>,
    pub catalog: Arc<dyn CatalogReader>,
    pub settlements: Arc<dyn SettlementStore>,
    pub gateway: Arc<dyn PaymentGatewayClient>,
    pub audit: Arc<dyn AuditRecorder>,
    pub notifier: Arc<dyn Notifier>,
}

impl PaymentAppState {
    fn reconciler(&self) -> StatusReconciler {
        StatusReconciler::new(
            self.orders.clone(),
            self.catalog.clone(),
            self.settlements.clone(),
            self.audit.clone(),
        )
    }

    pub fn process_notification_handler(&self) -> ProcessNotificationHandler {
        ProcessNotificationHandler::new(
            self.verifier.clone(),
            self.orders.clone(),
            self.gateway.clone(),
            self.audit.clone(),
            self.notifier.clone(),
            self.reconciler(),
        )
    }

    pub fn manage_transaction_handler(&self) -> ManageTransactionHandler {
        ManageTransactionHandler::new(
            self.orders.clone(),
            self.gateway.clone(),
            self.audit.clone(),
            self.reconciler(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /notifications - inbound gateway webhook.
///
/// The body is taken raw: signature verification and lenient parsing happen
/// in the application layer so malformed deliveries are still audited.
pub async fn handle_notification(
    State(state): State<PaymentAppState>,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, PaymentApiError> {
    let handler = state.process_notification_handler();
    let result = handler
        .handle(ProcessNotificationCommand {
            body: body.to_vec(),
        })
        .await?;

    let response = match result {
        ProcessNotificationResult::StatusApplied {
            order_ref,
            new_status,
            ..
        } => NotificationResponse::ok(format!("Order {} is now {}", order_ref, new_status.as_str())),
        ProcessNotificationResult::Held { raw_status } => NotificationResponse::ok(format!(
            "Transaction status '{}' acknowledged without action",
            raw_status
        )),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// POST /transactions/:order_ref/:action - manual transaction management.
pub async fn handle_manage_transaction(
    State(state): State<PaymentAppState>,
    Path((order_ref, action)): Path<(String, String)>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let action = parse_action(&action).ok_or(PaymentApiError::UnknownAction(action))?;

    let handler = state.manage_transaction_handler();
    let outcome = handler
        .handle(ManageTransactionCommand {
            order_ref: order_ref.clone(),
            action,
        })
        .await?;

    let status = match outcome {
        ReconcileOutcome::Applied { new_status, .. } => Some(new_status.as_str().to_string()),
        ReconcileOutcome::Held { .. } => None,
    };

    Ok((
        StatusCode::OK,
        Json(ManageTransactionResponse {
            success: true,
            order_ref,
            status,
        }),
    ))
}

/// GET /health - liveness probe.
pub async fn handle_health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

fn parse_action(s: &str) -> Option<ManageAction> {
    match s {
        "approve" => Some(ManageAction::Approve),
        "deny" => Some(ManageAction::Deny),
        "cancel" => Some(ManageAction::Cancel),
        "expire" => Some(ManageAction::Expire),
        "refund" => Some(ManageAction::Refund),
        _ => None,
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts processing errors to HTTP responses.
pub enum PaymentApiError {
    Notification(NotificationError),
    UnknownAction(String),
}

impl From<NotificationError> for PaymentApiError {
    fn from(err: NotificationError) -> Self {
        Self::Notification(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            PaymentApiError::Notification(err) => (err.status_code(), err.to_string()),
            PaymentApiError::UnknownAction(action) => (
                StatusCode::BAD_REQUEST,
                format!("Unknown transaction action: {}", action),
            ),
        };
        (status, Json(NotificationResponse::error(message))).into_response()
    }
}
