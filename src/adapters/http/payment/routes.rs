//! Axum router configuration for payment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    handle_health, handle_manage_transaction, handle_notification, PaymentAppState,
};

/// Create the payment API router.
///
/// # Routes
///
/// ## Webhook Endpoints (no auth, signature verified)
/// - `POST /notifications` - inbound gateway payment notification
///
/// ## Back-office Endpoints
/// - `POST /transactions/:order_ref/:action` - approve/deny/cancel/expire/refund
///
/// ## Probes
/// - `GET /health` - liveness
pub fn payment_routes() -> Router<PaymentAppState> {
    Router::new()
        .route("/notifications", post(handle_notification))
        .route(
            "/transactions/:order_ref/:action",
            post(handle_manage_transaction),
        )
        .route("/health", get(handle_health))
}

/// Create the complete payment module router, suitable for mounting at
/// `/api/payments`.
pub fn payment_router() -> Router<PaymentAppState> {
    Router::new().nest("/payments", payment_routes())
}
