//! In-memory port implementations shared by the payment handler tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::catalog::{CatalogProduct, ProductFormat, ResolvedLine};
use crate::domain::foundation::{
    AuditEventId, CustomerId, DomainError, Money, OrderId, OrderLineId, ProductId, PublisherId,
    Timestamp,
};
use crate::domain::gateway::{GatewayStatus, SignatureVerifier};
use crate::domain::order::{FulfillmentPlan, LibraryGrant, Order, OrderStatus};
use crate::ports::{
    AuditOutcome, AuditRecorder, CatalogReader, GatewayError, GrantOutcome, ManageAction, Notifier,
    OrderRepository, PaymentContext, PaymentGatewayClient, SettlementReceipt, SettlementStore,
};

pub const TEST_SERVER_KEY: &str = "SB-Mid-server-test-key";

/// Builds a signed webhook body for the given order reference.
pub fn paid_notification_body(order_ref: &str, status_code: &str, gross_amount: &str) -> Vec<u8> {
    let signature =
        SignatureVerifier::new(TEST_SERVER_KEY).compute(order_ref, status_code, gross_amount);
    serde_json::to_vec(&serde_json::json!({
        "order_id": order_ref,
        "status_code": status_code,
        "gross_amount": gross_amount,
        "signature_key": signature,
        "transaction_status": "settlement",
        "payment_type": "bank_transfer",
        "transaction_id": "txn-1",
        "currency": "IDR",
    }))
    .unwrap()
}

/// A resolved line carrying exactly one product of the given format.
pub fn direct_line(
    cents: i64,
    publisher_id: Option<PublisherId>,
    format: ProductFormat,
) -> ResolvedLine {
    ResolvedLine {
        line_id: OrderLineId::new(),
        line_total: Money::from_cents(cents),
        publisher_id,
        products: vec![CatalogProduct {
            id: ProductId::new(),
            format,
            publisher_id,
        }],
    }
}

/// A resolved bundle line expanding to one product per given format.
pub fn bundle_line(
    cents: i64,
    publisher_id: Option<PublisherId>,
    formats: Vec<ProductFormat>,
) -> ResolvedLine {
    ResolvedLine {
        line_id: OrderLineId::new(),
        line_total: Money::from_cents(cents),
        publisher_id,
        products: formats
            .into_iter()
            .map(|format| CatalogProduct {
                id: ProductId::new(),
                format,
                publisher_id,
            })
            .collect(),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Mock ports
// ════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct InMemoryOrders {
    by_reference: Mutex<HashMap<String, Order>>,
}

impl InMemoryOrders {
    pub fn insert(&self, order: Order) {
        self.by_reference
            .lock()
            .unwrap()
            .insert(order.gateway_reference.clone(), order);
    }

    pub fn set_status(&self, id: &OrderId, status: OrderStatus) {
        let mut orders = self.by_reference.lock().unwrap();
        if let Some(order) = orders.values_mut().find(|o| o.id == *id) {
            order.apply_status(status);
        }
    }

    pub fn status_of(&self, id: &OrderId) -> Option<OrderStatus> {
        self.by_reference
            .lock()
            .unwrap()
            .values()
            .find(|o| o.id == *id)
            .map(|o| o.status)
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrders {
    async fn find_by_reference(&self, reference: &str) -> Result<Option<Order>, DomainError> {
        Ok(self.by_reference.lock().unwrap().get(reference).cloned())
    }

    async fn update_status(&self, id: &OrderId, status: OrderStatus) -> Result<(), DomainError> {
        self.set_status(id, status);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCatalog {
    lines: Mutex<HashMap<OrderId, Vec<ResolvedLine>>>,
}

impl InMemoryCatalog {
    pub fn add_line(&self, order_id: &OrderId, line: ResolvedLine) {
        self.lines
            .lock()
            .unwrap()
            .entry(*order_id)
            .or_default()
            .push(line);
    }
}

#[async_trait]
impl CatalogReader for InMemoryCatalog {
    async fn resolve_lines(&self, order_id: &OrderId) -> Result<Vec<ResolvedLine>, DomainError> {
        Ok(self
            .lines
            .lock()
            .unwrap()
            .get(order_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Settlement store mirroring the real adapter's upsert semantics: grant and
/// revenue inserts are no-ops on conflict, and the order status commits with
/// the side effects.
pub struct InMemorySettlements {
    orders: Arc<InMemoryOrders>,
    grants: Mutex<HashSet<(CustomerId, ProductId)>>,
    revenue: Mutex<HashMap<(OrderId, PublisherId), Money>>,
    shipments: Mutex<HashSet<OrderId>>,
    applied: AtomicUsize,
}

impl InMemorySettlements {
    pub fn new(orders: Arc<InMemoryOrders>) -> Self {
        Self {
            orders,
            grants: Mutex::new(HashSet::new()),
            revenue: Mutex::new(HashMap::new()),
            shipments: Mutex::new(HashSet::new()),
            applied: AtomicUsize::new(0),
        }
    }

    pub fn applied_count(&self) -> usize {
        self.applied.load(Ordering::SeqCst)
    }

    pub fn distinct_grants(&self) -> usize {
        self.grants.lock().unwrap().len()
    }

    pub fn revenue_rows(&self) -> usize {
        self.revenue.lock().unwrap().len()
    }

    pub fn revenue_total(&self) -> Money {
        self.revenue
            .lock()
            .unwrap()
            .values()
            .fold(Money::ZERO, |acc, m| acc.checked_add(*m).unwrap_or(acc))
    }

    pub fn shipment_marked(&self, order_id: &OrderId) -> bool {
        self.shipments.lock().unwrap().contains(order_id)
    }
}

#[async_trait]
impl SettlementStore for InMemorySettlements {
    async fn apply_paid(
        &self,
        order: &Order,
        plan: &FulfillmentPlan,
        _payment: &PaymentContext,
    ) -> Result<SettlementReceipt, DomainError> {
        self.applied.fetch_add(1, Ordering::SeqCst);
        self.orders.set_status(&order.id, OrderStatus::Paid);

        let mut grant_set = self.grants.lock().unwrap();
        let grants = plan
            .grants
            .iter()
            .map(|grant| GrantOutcome {
                grant: grant.clone(),
                created: grant_set.insert((grant.customer_id, grant.product_id)),
            })
            .collect();

        let mut revenue = self.revenue.lock().unwrap();
        let mut revenue_rows_inserted = 0u64;
        for share in &plan.revenue_shares {
            let key = (plan.order_id, share.publisher_id);
            if let std::collections::hash_map::Entry::Vacant(slot) = revenue.entry(key) {
                slot.insert(share.amount);
                revenue_rows_inserted += 1;
            }
        }

        let shipments_marked = if plan.trigger_shipment {
            self.shipments.lock().unwrap().insert(plan.order_id);
            1
        } else {
            0
        };

        Ok(SettlementReceipt {
            grants,
            revenue_rows_inserted,
            shipments_marked,
        })
    }
}

#[derive(Default)]
pub struct StaticGateway {
    status: Mutex<Option<GatewayStatus>>,
    calls: AtomicUsize,
    fail_next: AtomicBool,
}

impl StaticGateway {
    pub fn set_status(&self, status: GatewayStatus) {
        *self.status.lock().unwrap() = Some(status);
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGatewayClient for StaticGateway {
    async fn fetch_status(&self, order_ref: &str) -> Result<GatewayStatus, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(GatewayError::Http("connection reset".to_string()));
        }
        self.status
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| GatewayError::TransactionNotFound(order_ref.to_string()))
    }

    async fn manage(
        &self,
        order_ref: &str,
        _action: ManageAction,
    ) -> Result<GatewayStatus, GatewayError> {
        self.fetch_status(order_ref).await
    }
}

#[derive(Default)]
pub struct InMemoryAudit {
    events: Mutex<Vec<(AuditEventId, Option<String>)>>,
    library_updates: AtomicUsize,
}

impl InMemoryAudit {
    pub fn appended(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn last_outcome(&self) -> Option<String> {
        self.events
            .lock()
            .unwrap()
            .last()
            .and_then(|(_, outcome)| outcome.clone())
    }

    pub fn library_updates(&self) -> usize {
        self.library_updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuditRecorder for InMemoryAudit {
    async fn append_received(
        &self,
        _order_ref: Option<&str>,
        _payload: &serde_json::Value,
    ) -> Result<AuditEventId, DomainError> {
        let id = AuditEventId::new();
        self.events.lock().unwrap().push((id, None));
        Ok(id)
    }

    async fn record_outcome(
        &self,
        event_id: &AuditEventId,
        outcome: AuditOutcome,
        _detail: Option<&str>,
        _gateway_snapshot: Option<&serde_json::Value>,
    ) -> Result<(), DomainError> {
        let mut events = self.events.lock().unwrap();
        if let Some((_, slot)) = events.iter_mut().find(|(id, _)| id == event_id) {
            *slot = Some(outcome.as_str().to_string());
        }
        Ok(())
    }

    async fn append_library_update(
        &self,
        _order_ref: &str,
        _grant: &LibraryGrant,
        _created: bool,
    ) -> Result<(), DomainError> {
        self.library_updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_before(&self, _timestamp: Timestamp) -> Result<u64, DomainError> {
        Ok(0)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    dispatched: AtomicUsize,
}

impl RecordingNotifier {
    pub fn dispatched(&self) -> usize {
        self.dispatched.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn order_status_changed(
        &self,
        _order: &Order,
        _status: OrderStatus,
    ) -> Result<(), DomainError> {
        self.dispatched.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// One order's worth of wired-up mocks.
pub struct TestWorld {
    pub orders: Arc<InMemoryOrders>,
    pub catalog: Arc<InMemoryCatalog>,
    pub settlements: Arc<InMemorySettlements>,
    pub gateway: Arc<StaticGateway>,
    pub audit: Arc<InMemoryAudit>,
    pub notifier: Arc<RecordingNotifier>,
    pub order_id: OrderId,
}

impl TestWorld {
    /// A world holding one pending order with the given reference and total.
    pub fn with_order(reference: &str, total_cents: i64) -> Self {
        let orders = Arc::new(InMemoryOrders::default());
        let order = Order {
            id: OrderId::new(),
            gateway_reference: reference.to_string(),
            customer_id: CustomerId::new(),
            status: OrderStatus::Pending,
            currency: "IDR".to_string(),
            total_amount: Money::from_cents(total_cents),
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        };
        let order_id = order.id;
        orders.insert(order);

        Self {
            settlements: Arc::new(InMemorySettlements::new(orders.clone())),
            catalog: Arc::new(InMemoryCatalog::default()),
            gateway: Arc::new(StaticGateway::default()),
            audit: Arc::new(InMemoryAudit::default()),
            notifier: Arc::new(RecordingNotifier::default()),
            order_id,
            orders,
        }
    }
}
