//! Domain layer: pure business types and logic, no I/O.

pub mod catalog;
pub mod foundation;
pub mod gateway;
pub mod order;
