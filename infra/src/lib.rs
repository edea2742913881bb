//! # Infrastructure Layer
//!
//! Concrete SMS connectors for the SmsGate workspace, following the
//! interfaces declared in `sg_core`.
//!
//! ## Architecture
//!
//! - **SMS**: the Aliyun SMS connector (request signing, HTTP transport,
//!   response interpretation) and a mock connector for development
//! - **Configuration**: connector configuration resolvers and loading of
//!   the service settings
//!
//! ## Features
//!
//! - `aliyun-sms`: Enable the Aliyun SMS connector (default)

// Re-export core types for convenience
pub use sg_core::*;

/// SMS connector module - external SMS providers
pub mod sms;

/// Configuration module for infrastructure services
pub mod config {
    //! Settings for the SMS connector service
    //!
    //! Connector credentials and templates are NOT part of these settings;
    //! they are fetched per send through a `ConfigResolver`.

    use serde::{Deserialize, Serialize};
    use sg_shared::{Environment, LoggingConfig};

    /// Default Aliyun SMS API endpoint
    pub const DEFAULT_ALIYUN_ENDPOINT: &str = "https://dysmsapi.aliyuncs.com/";
    /// Default Aliyun region
    pub const DEFAULT_ALIYUN_REGION: &str = "cn-hangzhou";

    /// Top-level settings
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct InfrastructureConfig {
        /// Deployment environment
        #[serde(default)]
        pub environment: Environment,
        /// Logging settings
        #[serde(default)]
        pub logging: LoggingConfig,
        /// SMS connector settings
        #[serde(default)]
        pub sms: SmsConfig,
    }

    /// SMS connector settings
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct SmsConfig {
        /// Connector implementation ("aliyun", "mock")
        pub provider: String,
        /// Id under which the connector configuration is stored
        pub connector_id: String,
        /// Provider API endpoint
        pub endpoint: String,
        /// Provider region
        pub region_id: String,
        /// Timeout for provider requests in seconds
        pub request_timeout_secs: u64,
        /// Directory holding `<connector_id>.json` configuration files
        pub config_dir: String,
        /// Country calling code treated as domestic
        pub home_country_code: String,
    }

    impl Default for SmsConfig {
        fn default() -> Self {
            Self {
                provider: "mock".to_string(),
                connector_id: "aliyun-short-message-service".to_string(),
                endpoint: DEFAULT_ALIYUN_ENDPOINT.to_string(),
                region_id: DEFAULT_ALIYUN_REGION.to_string(),
                request_timeout_secs: 30,
                config_dir: "config/connectors".to_string(),
                home_country_code: sg_shared::phone::HOME_COUNTRY_CODE.to_string(),
            }
        }
    }

    impl SmsConfig {
        /// Reject settings no connector can work with.
        ///
        /// The home country code must be non-empty digits: an empty code
        /// would be a prefix of every number and make all of them domestic.
        pub fn validate(&self) -> Result<(), crate::InfrastructureError> {
            let code = &self.home_country_code;
            if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
                return Err(crate::InfrastructureError::Config(format!(
                    "sms.home_country_code must be a non-empty calling code, got '{}'",
                    code
                )));
            }
            Ok(())
        }
    }

    impl Default for InfrastructureConfig {
        fn default() -> Self {
            let environment = Environment::default();
            Self {
                environment,
                logging: LoggingConfig::for_environment(environment),
                sms: SmsConfig::default(),
            }
        }
    }
}

/// Load service settings.
///
/// Sources, later ones overriding earlier ones:
/// 1. built-in defaults, with logging chosen for the detected environment
/// 2. the optional per-environment file (`config/sms.<env>.toml`)
/// 3. `SMSGATE__*` environment variables, e.g. `SMSGATE__SMS__PROVIDER=aliyun`
///
/// A `.env` file is loaded first if present.
pub fn load_config() -> Result<config::InfrastructureConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let environment = sg_shared::Environment::from_env();
    load_config_from(environment, environment.config_file())
}

/// Load service settings for `environment`, reading the optional settings
/// file at `config_file` (extension resolved by the `config` crate).
pub fn load_config_from(
    environment: sg_shared::Environment,
    config_file: &str,
) -> Result<config::InfrastructureConfig, InfrastructureError> {
    let logging = sg_shared::LoggingConfig::for_environment(environment);

    let settings = ::config::Config::builder()
        .set_default("environment", environment.to_string())?
        .set_default("logging.level", logging.level)?
        .set_default("logging.format", logging.format.as_str())?
        .set_default("logging.with_target", logging.with_target)?
        .set_default("logging.source_location", logging.source_location)?
        .add_source(::config::File::with_name(config_file).required(false))
        .add_source(
            ::config::Environment::with_prefix("SMSGATE")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    let loaded: config::InfrastructureConfig = settings.try_deserialize()?;
    loaded.sms.validate()?;

    tracing::debug!(
        environment = %loaded.environment,
        provider = %loaded.sms.provider,
        "Loaded SMS service configuration"
    );

    Ok(loaded)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Network-level HTTP failure
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success HTTP status
    #[error("HTTP status {status} from provider")]
    HttpStatus { status: u16, body: String },

    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Settings(#[from] ::config::ConfigError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request signing failed
    #[error("Signing error: {0}")]
    Signing(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<InfrastructureError> for ConnectorError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Config(message) | InfrastructureError::Signing(message) => {
                ConnectorError::invalid_config(message)
            }
            other => ConnectorError::transport(other),
        }
    }
}
