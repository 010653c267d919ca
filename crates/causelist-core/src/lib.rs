//! Shared service plumbing for Causelist binaries: tracing setup, health
//! endpoints, serde helpers, HTTP middleware.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
