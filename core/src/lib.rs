//! # SmsGate Core
//!
//! Domain layer for outbound SMS connectors. This crate contains the
//! message usage types, template and configuration models with their
//! validation rules, the connector and configuration-resolver interfaces,
//! and the connector error model shared by every provider implementation.

pub mod connector;
pub mod domain;
pub mod errors;

// Re-export commonly used types for convenience
pub use connector::*;
pub use domain::*;
pub use errors::*;
