//! SettlementStore port - atomic application of a paid transition.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::order::{FulfillmentPlan, LibraryGrant, Order};

/// Payment details recorded alongside revenue ledger entries.
#[derive(Debug, Clone)]
pub struct PaymentContext {
    /// Gateway-side transaction identifier.
    pub transaction_id: String,
    /// Payment method reported by the gateway.
    pub payment_type: String,
}

/// One grant's outcome within a settlement.
#[derive(Debug, Clone)]
pub struct GrantOutcome {
    pub grant: LibraryGrant,
    /// False when the (customer, product) record already existed; re-purchase
    /// never resets reading progress.
    pub created: bool,
}

/// What a settlement actually wrote.
#[derive(Debug, Clone)]
pub struct SettlementReceipt {
    pub grants: Vec<GrantOutcome>,
    pub revenue_rows_inserted: u64,
    pub shipments_marked: u64,
}

/// Port for committing every side effect of a paid transition as one unit.
///
/// Implementations MUST execute the order status update, all library-access
/// upserts, all revenue inserts, and shipment updates in a single database
/// transaction: either all effects commit or none do. Existence checks run
/// inside that transaction so concurrent duplicate deliveries cannot race.
#[async_trait]
pub trait SettlementStore: Send + Sync {
    /// Applies the plan atomically and reports what was written.
    async fn apply_paid(
        &self,
        order: &Order,
        plan: &FulfillmentPlan,
        payment: &PaymentContext,
    ) -> Result<SettlementReceipt, DomainError>;
}
