//! Configuration types shared across crates
//!
//! - `environment` - deployment environment detection
//! - `logging` - log level and output format per environment

pub mod environment;
pub mod logging;

pub use environment::Environment;
pub use logging::{LogFormat, LoggingConfig};
