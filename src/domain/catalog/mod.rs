//! Catalog collaborator types.
//!
//! The catalog itself (products, bundles, authors, publishers) is managed by
//! the CRUD layer; the fulfillment engine only needs the resolved shape of an
//! order line: which concrete products it expands to, whether each is
//! physical, and which publisher owns the line's revenue.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, OrderLineId, ProductId, PublisherId};

/// Whether a product is delivered digitally or shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductFormat {
    Digital,
    Physical,
}

impl ProductFormat {
    pub fn is_physical(&self) -> bool {
        matches!(self, ProductFormat::Physical)
    }
}

/// A product as seen by fulfillment: identity, format, ownership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub format: ProductFormat,
    /// Publisher resolved via Product -> Author -> Publisher. Nullable:
    /// products without a publisher earn no revenue split.
    pub publisher_id: Option<PublisherId>,
}

/// An order line with its bundle expansion already applied.
///
/// A direct product line resolves to exactly one product; a bundle line
/// resolves to each constituent product. The line's revenue is attributed to
/// `publisher_id` (for bundles, resolved via Bundle -> Author -> Publisher).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLine {
    pub line_id: OrderLineId,
    /// unit price x quantity, computed at checkout and immutable since.
    pub line_total: Money,
    /// Owner of this line's revenue share.
    pub publisher_id: Option<PublisherId>,
    /// The concrete products the customer is entitled to.
    pub products: Vec<CatalogProduct>,
}
