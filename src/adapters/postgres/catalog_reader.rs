//! PostgreSQL implementation of CatalogReader.
//!
//! Resolves order lines against the catalog tables, expanding bundles into
//! their constituent products. Publisher ownership resolves through the
//! author: Product -> Author -> Publisher for direct lines, Bundle -> Author
//! -> Publisher for bundle lines.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::catalog::{CatalogProduct, ProductFormat, ResolvedLine};
use crate::domain::foundation::{
    BundleId, DomainError, ErrorCode, Money, OrderId, OrderLineId, ProductId, PublisherId,
};
use crate::domain::order::{LineItem, OrderLine};
use crate::ports::CatalogReader;

/// PostgreSQL implementation of CatalogReader.
#[derive(Clone)]
pub struct PostgresCatalogReader {
    pool: PgPool,
}

impl PostgresCatalogReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn bundle_products(&self, bundle_id: Uuid) -> Result<Vec<CatalogProduct>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.format, a.publisher_id
            FROM bundle_products bp
            JOIN products p ON p.id = bp.product_id
            LEFT JOIN authors a ON a.id = p.author_id
            WHERE bp.bundle_id = $1
            "#,
        )
        .bind(bundle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to expand bundle: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_product).collect()
    }
}

#[async_trait]
impl CatalogReader for PostgresCatalogReader {
    async fn resolve_lines(&self, order_id: &OrderId) -> Result<Vec<ResolvedLine>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT ol.id, ol.product_id, ol.bundle_id, ol.unit_price_cents, ol.quantity,
                   p.format AS product_format,
                   pa.publisher_id AS product_publisher_id,
                   ba.publisher_id AS bundle_publisher_id
            FROM order_lines ol
            LEFT JOIN products p ON p.id = ol.product_id
            LEFT JOIN authors pa ON pa.id = p.author_id
            LEFT JOIN bundles b ON b.id = ol.bundle_id
            LEFT JOIN authors ba ON ba.id = b.author_id
            WHERE ol.order_id = $1
            ORDER BY ol.created_at
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch order lines: {}", e),
            )
        })?;

        let mut lines = Vec::with_capacity(rows.len());
        for row in rows {
            let line_id: Uuid = row.try_get("id").map_err(row_error)?;
            let unit_price_cents: i64 = row.try_get("unit_price_cents").map_err(row_error)?;
            let quantity: i32 = row.try_get("quantity").map_err(row_error)?;
            let product_id: Option<Uuid> = row.try_get("product_id").map_err(row_error)?;
            let bundle_id: Option<Uuid> = row.try_get("bundle_id").map_err(row_error)?;

            let (item, publisher_id, products) = match (product_id, bundle_id) {
                (Some(product_id), _) => {
                    let format_str: String = row.try_get("product_format").map_err(row_error)?;
                    let publisher: Option<Uuid> =
                        row.try_get("product_publisher_id").map_err(row_error)?;
                    let publisher = publisher.map(PublisherId::from_uuid);
                    let product = CatalogProduct {
                        id: ProductId::from_uuid(product_id),
                        format: parse_format(&format_str)?,
                        publisher_id: publisher,
                    };
                    (
                        LineItem::Product(ProductId::from_uuid(product_id)),
                        publisher,
                        vec![product],
                    )
                }
                (None, Some(bundle_id)) => {
                    let publisher: Option<Uuid> =
                        row.try_get("bundle_publisher_id").map_err(row_error)?;
                    (
                        LineItem::Bundle(BundleId::from_uuid(bundle_id)),
                        publisher.map(PublisherId::from_uuid),
                        self.bundle_products(bundle_id).await?,
                    )
                }
                (None, None) => {
                    return Err(DomainError::new(
                        ErrorCode::ProductNotFound,
                        format!("Order line {} references neither product nor bundle", line_id),
                    ));
                }
            };

            let line = OrderLine {
                id: OrderLineId::from_uuid(line_id),
                order_id: *order_id,
                item,
                unit_price: Money::from_cents(unit_price_cents),
                quantity: quantity.max(0) as u32,
            };
            let line_total = line.line_total().ok_or_else(|| {
                DomainError::new(
                    ErrorCode::InvalidFormat,
                    format!("Order line {} total overflows", line.id),
                )
            })?;

            lines.push(ResolvedLine {
                line_id: line.id,
                line_total,
                publisher_id,
                products,
            });
        }

        Ok(lines)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_product(row: sqlx::postgres::PgRow) -> Result<CatalogProduct, DomainError> {
    let format_str: String = row.try_get("format").map_err(row_error)?;
    let publisher: Option<Uuid> = row.try_get("publisher_id").map_err(row_error)?;
    Ok(CatalogProduct {
        id: ProductId::from_uuid(row.try_get("id").map_err(row_error)?),
        format: parse_format(&format_str)?,
        publisher_id: publisher.map(PublisherId::from_uuid),
    })
}

fn parse_format(s: &str) -> Result<ProductFormat, DomainError> {
    match s {
        "digital" => Ok(ProductFormat::Digital),
        "physical" => Ok(ProductFormat::Physical),
        other => Err(DomainError::new(
            ErrorCode::InvalidFormat,
            format!("Unknown product format in database: {}", other),
        )),
    }
}

fn row_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to read catalog row: {}", e),
    )
}
