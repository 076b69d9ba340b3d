//! Shelfbound - Online Bookstore Backend
//!
//! This crate implements the payment-notification reconciliation and
//! order-fulfillment engine: gateway webhook authentication, authoritative
//! status resolution, and transactional fulfillment side effects.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
