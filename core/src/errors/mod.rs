//! Connector error types.
//!
//! Every failure of a send is reported as one of these kinds so that callers
//! can decide on retries or user-facing messages without inspecting strings.

use thiserror::Error;

use crate::domain::UsageType;

/// Boxed transport failure forwarded without reinterpretation
pub type TransportFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by SMS connectors
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// Configuration failed schema validation; raised before any network call
    #[error("Invalid connector configuration: {message} | 连接器配置无效: {message}")]
    InvalidConfig { message: String },

    /// No template configured for the requested usage type
    #[error("Template not found for usage type: {usage_type} | 未找到对应用途的短信模板: {usage_type}")]
    TemplateNotFound { usage_type: UsageType },

    /// Provider response could not be parsed or failed the response schema
    #[error("Invalid provider response: {message} | 服务商响应无效: {message}")]
    InvalidResponse { message: String },

    /// Provider answered with a well-formed, non-OK result
    #[error("Provider error {code}: {message} | 服务商返回错误 {code}: {message}")]
    General { code: String, message: String },

    /// Network-level failure, propagated unchanged
    #[error(transparent)]
    Transport(TransportFailure),
}

impl ConnectorError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    pub fn general(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::General {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn transport<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(error))
    }

    /// Stable identifier of the error kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "INVALID_CONFIG",
            Self::TemplateNotFound { .. } => "TEMPLATE_NOT_FOUND",
            Self::InvalidResponse { .. } => "INVALID_RESPONSE",
            Self::General { .. } => "GENERAL",
            Self::Transport(_) => "TRANSPORT",
        }
    }

    /// Whether a caller-side retry could succeed without changing the request.
    ///
    /// Only transport failures qualify; every other kind is deterministic.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Provider error code, for [`ConnectorError::General`]
    pub fn provider_code(&self) -> Option<&str> {
        match self {
            Self::General { code, .. } => Some(code),
            _ => None,
        }
    }
}

pub type ConnectorResult<T> = Result<T, ConnectorError>;

#[cfg(test)]
mod tests;
