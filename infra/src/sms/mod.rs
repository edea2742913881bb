//! SMS Connector Module
//!
//! This module provides the SMS connectors used to deliver verification
//! codes and other template-based messages.
//!
//! ## Features
//!
//! - **Aliyun Connector**: signed `SendSms` calls to Aliyun SMS
//! - **Mock Connector**: records messages for development and tests
//! - **Configuration Resolvers**: in-memory and file-backed stores
//! - **Security**: phone numbers masked in logs, secrets never logged

use serde_json::Value;
use sg_core::{ConfigResolver, ConnectorResult, SmsConnector, SmsConnectorConfig};
use std::sync::Arc;

pub mod mock_sms;
pub mod resolver;

// Aliyun SMS connector (feature-gated)
#[cfg(feature = "aliyun-sms")]
pub mod aliyun;

// Re-export commonly used types
pub use mock_sms::{MockSmsConnector, SentMessage};
pub use resolver::{FileConfigResolver, StaticConfigResolver};

#[cfg(feature = "aliyun-sms")]
pub use aliyun::{AliyunClient, AliyunSmsConnector, HttpTransport, ReqwestTransport};

#[cfg(test)]
mod tests;

/// Fetch and validate a connector configuration.
///
/// `explicit` takes precedence over the resolver. The result is never
/// cached: every send validates the configuration it uses.
pub async fn resolve_connector_config(
    resolver: &dyn ConfigResolver,
    connector_id: &str,
    explicit: Option<Value>,
) -> ConnectorResult<SmsConnectorConfig> {
    let raw = match explicit {
        Some(value) => value,
        None => resolver.resolve(connector_id).await?,
    };
    SmsConnectorConfig::from_value(raw)
}

/// Create an SMS connector based on configuration
///
/// Returns the connector named by `config.provider`. Unknown providers, and
/// an Aliyun connector that fails to initialize, fall back to the mock
/// connector.
pub fn create_sms_connector(
    config: &crate::config::SmsConfig,
    resolver: Arc<dyn ConfigResolver>,
) -> Box<dyn SmsConnector> {
    match config.provider.as_str() {
        "mock" => Box::new(create_mock_connector(config, resolver)),
        #[cfg(feature = "aliyun-sms")]
        "aliyun" => match AliyunSmsConnector::from_settings(config, resolver.clone()) {
            Ok(connector) => Box::new(connector),
            Err(e) => {
                tracing::error!("Failed to initialize Aliyun SMS connector: {}", e);
                tracing::warn!("Falling back to mock SMS connector");
                Box::new(create_mock_connector(config, resolver))
            }
        },
        _ => {
            tracing::warn!(
                "Unknown SMS provider '{}', using mock implementation",
                config.provider
            );
            Box::new(create_mock_connector(config, resolver))
        }
    }
}

/// Mock connector honouring the same settings as the real providers
pub fn create_mock_connector(
    config: &crate::config::SmsConfig,
    resolver: Arc<dyn ConfigResolver>,
) -> MockSmsConnector {
    let connector = MockSmsConnector::new(config.connector_id.clone(), resolver);
    match config.validate() {
        Ok(()) => connector.with_home_country_code(config.home_country_code.clone()),
        Err(e) => {
            tracing::warn!("{}; mock connector keeps the default home country code", e);
            connector
        }
    }
}
