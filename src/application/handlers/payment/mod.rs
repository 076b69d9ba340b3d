//! Payment reconciliation handlers.
//!
//! `ProcessNotificationHandler` drives inbound webhook deliveries;
//! `ManageTransactionHandler` drives manual back-office actions. Both funnel
//! through the shared `StatusReconciler` so the transition table and
//! settlement semantics cannot diverge between the two paths.

mod manage_transaction;
mod process_notification;
mod reconcile;

#[cfg(test)]
pub(crate) mod test_support;

pub use manage_transaction::{ManageTransactionCommand, ManageTransactionHandler};
pub use process_notification::{
    ProcessNotificationCommand, ProcessNotificationHandler, ProcessNotificationResult,
};
pub use reconcile::{ReconcileOutcome, StatusReconciler};
