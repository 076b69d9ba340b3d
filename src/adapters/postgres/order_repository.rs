//! PostgreSQL implementation of OrderRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    CustomerId, DomainError, ErrorCode, Money, OrderId, Timestamp,
};
use crate::domain::order::{Order, OrderStatus};
use crate::ports::OrderRepository;

/// PostgreSQL implementation of OrderRepository.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Order>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, gateway_reference, customer_id, status, currency,
                   total_amount_cents, created_at, updated_at
            FROM orders
            WHERE gateway_reference = $1
            "#,
        )
        .bind(reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch order: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(row_to_order(row)?)),
            None => Ok(None),
        }
    }

    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update order status: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::OrderNotFound,
                format!("Order not found: {}", id),
            ));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_order(row: sqlx::postgres::PgRow) -> Result<Order, DomainError> {
    let status_str: String = row.try_get("status").map_err(row_error)?;
    let status = OrderStatus::parse(&status_str).ok_or_else(|| {
        DomainError::new(
            ErrorCode::InvalidFormat,
            format!("Unknown order status in database: {}", status_str),
        )
    })?;

    Ok(Order {
        id: OrderId::from_uuid(row.try_get("id").map_err(row_error)?),
        gateway_reference: row.try_get("gateway_reference").map_err(row_error)?,
        customer_id: CustomerId::from_uuid(row.try_get("customer_id").map_err(row_error)?),
        status,
        currency: row.try_get("currency").map_err(row_error)?,
        total_amount: Money::from_cents(row.try_get("total_amount_cents").map_err(row_error)?),
        created_at: Timestamp::from_datetime(row.try_get("created_at").map_err(row_error)?),
        updated_at: Timestamp::from_datetime(row.try_get("updated_at").map_err(row_error)?),
    })
}

fn row_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to read order row: {}", e),
    )
}
