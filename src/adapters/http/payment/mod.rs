//! HTTP adapter for payment reconciliation endpoints.

mod dto;
mod handlers;
mod routes;

pub use handlers::PaymentAppState;
pub use routes::payment_router;
