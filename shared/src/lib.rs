//! Shared utilities and common types for the SmsGate workspace
//!
//! This crate provides functionality used by every other crate:
//! - Environment detection and logging configuration
//! - `tracing` subscriber initialisation
//! - Phone number helpers (normalisation, masking, country code checks)

pub mod config;
pub mod telemetry;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{Environment, LogFormat, LoggingConfig};
pub use telemetry::init_tracing;
pub use utils::phone;
