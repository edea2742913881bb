//! Connector interfaces and configuration
//!
//! A connector adapts a generic "send message" call to one SMS provider.
//! Configuration is resolved per call (explicitly supplied or fetched through
//! an injected [`ConfigResolver`]) and validated on every send.

mod config;
mod traits;

#[cfg(test)]
mod tests;

pub use config::SmsConnectorConfig;
pub use traits::{ConfigResolver, FnConfigResolver, SendReceipt, SmsConnector};
