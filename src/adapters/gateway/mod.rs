//! Payment gateway adapter (HTTP).

mod client;

pub use client::{HttpGatewayClient, HttpGatewayConfig};
