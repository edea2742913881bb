//! Environment configuration module

use serde::{Deserialize, Serialize};
use std::env;

/// Deployment environment the connector runs in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Staging/test environment
    Staging,
    /// Production environment
    Production,
}

impl Environment {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Detect the environment from `SMSGATE_ENV`, falling back to `RUST_ENV`.
    ///
    /// Unknown or missing values resolve to [`Environment::Development`].
    pub fn from_env() -> Self {
        env::var("SMSGATE_ENV")
            .or_else(|_| env::var("RUST_ENV"))
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Base name of the optional configuration file for this environment
    /// (the `config` crate resolves the extension).
    pub fn config_file(&self) -> &'static str {
        match self {
            Environment::Development => "config/sms.development",
            Environment::Staging => "config/sms.staging",
            Environment::Production => "config/sms.production",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}
