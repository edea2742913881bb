//! Connector configuration schema and validation

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::domain::{MessageTemplate, UsageType};
use crate::errors::{ConnectorError, ConnectorResult};

/// Credentials, sender signature and templates of an SMS connector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SmsConnectorConfig {
    /// Provider access key id
    #[validate(length(min = 1, message = "must not be empty"))]
    pub access_key_id: String,
    /// Provider access key secret, used as the signing key
    #[validate(length(min = 1, message = "must not be empty"))]
    pub access_key_secret: String,
    /// Sender signature shown to recipients
    #[validate(length(min = 1, message = "must not be empty"))]
    pub sign_name: String,
    /// Templates, one per usage type
    #[validate(length(min = 1, message = "at least one template is required"))]
    pub templates: Vec<MessageTemplate>,
}

impl SmsConnectorConfig {
    /// Parse and validate a raw configuration value.
    ///
    /// Missing or mistyped fields and failed validation both surface as
    /// [`ConnectorError::InvalidConfig`].
    pub fn from_value(value: Value) -> ConnectorResult<Self> {
        let config: Self = serde_json::from_value(value)
            .map_err(|e| ConnectorError::invalid_config(e.to_string()))?;
        config.ensure_valid()?;
        Ok(config)
    }

    /// Check field constraints and required usage type coverage
    pub fn ensure_valid(&self) -> ConnectorResult<()> {
        self.validate()
            .map_err(|errors| ConnectorError::invalid_config(describe(&errors)))?;

        let missing = self.missing_usage_types();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(UsageType::as_str).collect();
            return Err(ConnectorError::invalid_config(format!(
                "Missing templates for usage types: {}",
                names.join(", ")
            )));
        }

        Ok(())
    }

    /// Required usage types without a configured template
    pub fn missing_usage_types(&self) -> Vec<UsageType> {
        UsageType::REQUIRED
            .iter()
            .copied()
            .filter(|usage| self.find_template(*usage).is_none())
            .collect()
    }

    /// First template configured for `usage_type`
    pub fn find_template(&self, usage_type: UsageType) -> Option<&MessageTemplate> {
        self.templates
            .iter()
            .find(|template| template.usage_type == usage_type)
    }

    /// Template code to send for `usage_type` to a domestic or international
    /// recipient
    pub fn template_code_for(
        &self,
        usage_type: UsageType,
        is_domestic: bool,
    ) -> ConnectorResult<&str> {
        self.find_template(usage_type)
            .map(|template| template.template_code_for(is_domestic))
            .ok_or(ConnectorError::TemplateNotFound { usage_type })
    }
}

fn describe(errors: &ValidationErrors) -> String {
    let mut details: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                let reason = error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                format!("{}: {}", field, reason)
            })
        })
        .collect();
    details.sort();
    details.join("; ")
}
