//! Application Layer - Command handlers orchestrating domain and ports.

pub mod handlers;
