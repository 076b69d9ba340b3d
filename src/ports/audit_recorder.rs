//! AuditRecorder port - durable trail of every notification and outcome.
//!
//! One event is appended per inbound notification at receipt time, before
//! verification, so rejected attempts leave forensic evidence. The same event
//! is later amended with a terminal outcome. The amend-after-append pattern
//! is a deliberate exception to strict append-only; outcome writes happen
//! outside the settlement transaction and are diagnostic, not authoritative.

use async_trait::async_trait;

use crate::domain::foundation::{AuditEventId, DomainError, Timestamp};
use crate::domain::order::LibraryGrant;

/// Terminal outcome of processing one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    /// Fully processed (including "recognized but no action").
    Processed,
    /// Signature verification failed.
    RejectedInvalidSignature,
    /// The order reference was unknown.
    RejectedOrderNotFound,
    /// A gateway or database failure aborted processing.
    Error,
}

impl AuditOutcome {
    /// The persisted representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::RejectedInvalidSignature => "rejected_invalid_signature",
            Self::RejectedOrderNotFound => "rejected_order_not_found",
            Self::Error => "error",
        }
    }
}

/// Port for the append-mostly audit event log.
#[async_trait]
pub trait AuditRecorder: Send + Sync {
    /// Appends a received-notification event with the raw payload.
    ///
    /// Runs before verification; `order_ref` may be absent for malformed
    /// payloads.
    async fn append_received(
        &self,
        order_ref: Option<&str>,
        payload: &serde_json::Value,
    ) -> Result<AuditEventId, DomainError>;

    /// Amends an event with its terminal outcome, optional detail, and the
    /// gateway status snapshot when one was fetched.
    async fn record_outcome(
        &self,
        event_id: &AuditEventId,
        outcome: AuditOutcome,
        detail: Option<&str>,
        gateway_snapshot: Option<&serde_json::Value>,
    ) -> Result<(), DomainError>;

    /// Appends a `library_update` event mirroring one grant (new or no-op).
    async fn append_library_update(
        &self,
        order_ref: &str,
        grant: &LibraryGrant,
        created: bool,
    ) -> Result<(), DomainError>;

    /// Deletes events older than the given timestamp (retention policy).
    ///
    /// Returns the number of events deleted.
    async fn delete_before(&self, timestamp: Timestamp) -> Result<u64, DomainError>;
}
