//! Request-scoped models shared across handlers.

pub mod auth;
pub mod config;
