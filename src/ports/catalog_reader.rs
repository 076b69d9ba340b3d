//! CatalogReader port - resolves order lines against the catalog.

use async_trait::async_trait;

use crate::domain::catalog::ResolvedLine;
use crate::domain::foundation::{DomainError, OrderId};

/// Port onto the catalog managed by the CRUD layer.
///
/// Returns each order line with bundles expanded to their constituent
/// products and publisher ownership resolved (Product -> Author -> Publisher,
/// or Bundle -> Author -> Publisher).
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Resolves all lines of an order for fulfillment planning.
    async fn resolve_lines(&self, order_id: &OrderId) -> Result<Vec<ResolvedLine>, DomainError>;
}
