//! Identity types shared between the gateway and Causelist services.
//!
//! Services never verify credentials themselves; the gateway authenticates
//! and forwards the caller's identity in trusted headers.

pub mod identity;

pub use identity::IdentityHeaders;
