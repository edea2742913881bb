//! Traits implemented by SMS connectors and their configuration sources

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::SendMessageRequest;
use crate::errors::ConnectorResult;

/// Source of connector configuration, keyed by connector id.
///
/// Passed to connectors at construction; connectors never cache what it
/// returns.
#[async_trait]
pub trait ConfigResolver: Send + Sync {
    /// Fetch the raw configuration stored for `connector_id`
    async fn resolve(&self, connector_id: &str) -> ConnectorResult<Value>;
}

/// Adapts a plain function into a [`ConfigResolver`]
pub struct FnConfigResolver<F> {
    resolve_fn: F,
}

impl<F> FnConfigResolver<F>
where
    F: Fn(&str) -> ConnectorResult<Value> + Send + Sync,
{
    pub fn new(resolve_fn: F) -> Self {
        Self { resolve_fn }
    }
}

#[async_trait]
impl<F> ConfigResolver for FnConfigResolver<F>
where
    F: Fn(&str) -> ConnectorResult<Value> + Send + Sync,
{
    async fn resolve(&self, connector_id: &str) -> ConnectorResult<Value> {
        (self.resolve_fn)(connector_id)
    }
}

/// Result of a successful send: the provider's raw HTTP response plus the
/// identifiers it reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: String,
    /// Provider request id
    pub request_id: Option<String>,
    /// Provider delivery receipt id
    pub biz_id: Option<String>,
}

/// Outbound SMS connector
#[async_trait]
pub trait SmsConnector: Send + Sync {
    /// Send one message.
    ///
    /// `config` overrides the configuration otherwise fetched from the
    /// connector's resolver. Each call performs at most one provider request;
    /// retry policy belongs to the caller.
    async fn send_message(
        &self,
        request: &SendMessageRequest,
        config: Option<Value>,
    ) -> ConnectorResult<SendReceipt>;

    /// Identifier used to look up this connector's configuration
    fn connector_id(&self) -> &str;

    /// Human readable provider name (e.g. "Aliyun", "Mock")
    fn provider_name(&self) -> &str;
}
