//! Outbound message request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::usage_type::UsageType;

/// A single message to deliver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    /// Destination phone number, country-code-prefixed
    pub to: String,
    /// Flow the message belongs to; selects the template
    #[serde(rename = "type")]
    pub usage_type: UsageType,
    /// Template variables, forwarded to the provider as JSON
    pub payload: Value,
}

impl SendMessageRequest {
    pub fn new(to: impl Into<String>, usage_type: UsageType, payload: Value) -> Self {
        Self {
            to: to.into(),
            usage_type,
            payload,
        }
    }

    /// Payload serialized as the provider's template parameter string
    pub fn template_param(&self) -> String {
        self.payload.to_string()
    }
}
