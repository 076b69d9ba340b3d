//! Adapters - Implementations of ports against concrete infrastructure.

pub mod gateway;
pub mod http;
pub mod notify;
pub mod postgres;
