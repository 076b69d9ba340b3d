//! PostgreSQL implementation of AuditRecorder.
//!
//! Events are appended at receipt time and later amended with their terminal
//! outcome. Amends run outside the settlement transaction: the trail is
//! diagnostic, and a failed amend never rolls back a settlement.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{AuditEventId, DomainError, ErrorCode, Timestamp};
use crate::domain::order::LibraryGrant;
use crate::ports::{AuditOutcome, AuditRecorder};

/// PostgreSQL implementation of AuditRecorder.
#[derive(Clone)]
pub struct PostgresAuditRecorder {
    pool: PgPool,
}

impl PostgresAuditRecorder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRecorder for PostgresAuditRecorder {
    async fn append_received(
        &self,
        order_ref: Option<&str>,
        payload: &serde_json::Value,
    ) -> Result<AuditEventId, DomainError> {
        let id = AuditEventId::new();
        sqlx::query(
            r#"
            INSERT INTO audit_events (id, event_type, order_ref, payload, created_at)
            VALUES ($1, 'notification_received', $2, $3, NOW())
            "#,
        )
        .bind(id.as_uuid())
        .bind(order_ref)
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to append audit event: {}", e),
            )
        })?;

        Ok(id)
    }

    async fn record_outcome(
        &self,
        event_id: &AuditEventId,
        outcome: AuditOutcome,
        detail: Option<&str>,
        gateway_snapshot: Option<&serde_json::Value>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE audit_events SET
                outcome = $2,
                detail = $3,
                gateway_snapshot = $4,
                resolved_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(event_id.as_uuid())
        .bind(outcome.as_str())
        .bind(detail)
        .bind(gateway_snapshot)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to record audit outcome: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AuditEventNotFound,
                format!("Audit event not found: {}", event_id),
            ));
        }

        Ok(())
    }

    async fn append_library_update(
        &self,
        order_ref: &str,
        grant: &LibraryGrant,
        created: bool,
    ) -> Result<(), DomainError> {
        let payload = serde_json::json!({
            "customer_id": grant.customer_id,
            "product_id": grant.product_id,
            "created": created,
        });

        sqlx::query(
            r#"
            INSERT INTO audit_events (id, event_type, order_ref, payload, outcome, created_at)
            VALUES ($1, 'library_update', $2, $3, 'processed', NOW())
            "#,
        )
        .bind(AuditEventId::new().as_uuid())
        .bind(order_ref)
        .bind(&payload)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to append library_update event: {}", e),
            )
        })?;

        Ok(())
    }

    async fn delete_before(&self, timestamp: Timestamp) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM audit_events WHERE created_at < $1")
            .bind(timestamp.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to prune audit events: {}", e),
                )
            })?;

        Ok(result.rows_affected())
    }
}
