//! Order domain: aggregate, status machine, and fulfillment planning.

mod fulfillment;
mod order;
mod state_machine;
mod status;

pub use fulfillment::{build_plan, FulfillmentPlan, LibraryGrant, RevenueShare};
pub use order::{LineItem, Order, OrderLine};
pub use state_machine::{decide, Decision};
pub use status::OrderStatus;
