//! PostgreSQL implementation of SettlementStore.
//!
//! All side effects of a paid transition commit in a single transaction: the
//! order status update, the library-access upserts, the revenue inserts, and
//! the shipment record. The unique constraints on library_access_records
//! (customer_id, product_id) and revenue_transactions (order_id, publisher_id)
//! make replayed settlements no-ops instead of duplicates, even under
//! concurrent delivery.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::order::{FulfillmentPlan, Order, OrderStatus};
use crate::ports::{GrantOutcome, PaymentContext, SettlementReceipt, SettlementStore};

/// PostgreSQL implementation of SettlementStore.
#[derive(Clone)]
pub struct PostgresSettlementStore {
    pool: PgPool,
}

impl PostgresSettlementStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettlementStore for PostgresSettlementStore {
    async fn apply_paid(
        &self,
        order: &Order,
        plan: &FulfillmentPlan,
        payment: &PaymentContext,
    ) -> Result<SettlementReceipt, DomainError> {
        let mut tx = self.pool.begin().await.map_err(tx_error)?;

        // The UPDATE takes the row lock; concurrent settlements of the same
        // order serialize here.
        sqlx::query(
            r#"
            UPDATE orders SET status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(OrderStatus::Paid.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to mark order paid: {}", e),
            )
        })?;

        let mut grants = Vec::with_capacity(plan.grants.len());
        for grant in &plan.grants {
            let result = sqlx::query(
                r#"
                INSERT INTO library_access_records (
                    id, customer_id, product_id, order_id, granted_at
                ) VALUES ($1, $2, $3, $4, NOW())
                ON CONFLICT (customer_id, product_id) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(grant.customer_id.as_uuid())
            .bind(grant.product_id.as_uuid())
            .bind(plan.order_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to upsert library access: {}", e),
                )
            })?;

            grants.push(GrantOutcome {
                grant: grant.clone(),
                created: result.rows_affected() > 0,
            });
        }

        let mut revenue_rows_inserted = 0u64;
        for share in &plan.revenue_shares {
            let result = sqlx::query(
                r#"
                INSERT INTO revenue_transactions (
                    id, order_id, publisher_id, amount_cents,
                    gateway_transaction_id, payment_type, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, NOW())
                ON CONFLICT (order_id, publisher_id) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(plan.order_id.as_uuid())
            .bind(share.publisher_id.as_uuid())
            .bind(share.amount.cents())
            .bind(&payment.transaction_id)
            .bind(&payment.payment_type)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to insert revenue transaction: {}", e),
                )
            })?;

            revenue_rows_inserted += result.rows_affected();
        }

        let shipments_marked = if plan.trigger_shipment {
            // A checkout-created record sits in 'awaiting_payment'; move it to
            // 'pending' without touching one that already advanced further.
            let result = sqlx::query(
                r#"
                INSERT INTO shipment_records (id, order_id, status, created_at, updated_at)
                VALUES ($1, $2, 'pending', NOW(), NOW())
                ON CONFLICT (order_id) DO UPDATE
                    SET status = 'pending', updated_at = NOW()
                    WHERE shipment_records.status = 'awaiting_payment'
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(plan.order_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to create shipment record: {}", e),
                )
            })?;
            result.rows_affected()
        } else {
            0
        };

        tx.commit().await.map_err(tx_error)?;

        Ok(SettlementReceipt {
            grants,
            revenue_rows_inserted,
            shipments_marked,
        })
    }
}

fn tx_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Settlement transaction failed: {}", e),
    )
}
