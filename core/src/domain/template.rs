//! Provider message templates.

use serde::{Deserialize, Serialize};

use super::usage_type::UsageType;

/// Associates a usage type with the provider-assigned template identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplate {
    /// Which flow this template serves
    pub usage_type: UsageType,
    /// Template code for domestic recipients
    pub template_code: String,
    /// Template code for recipients outside the home country
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub international_template_code: Option<String>,
}

impl MessageTemplate {
    pub fn new(usage_type: UsageType, template_code: impl Into<String>) -> Self {
        Self {
            usage_type,
            template_code: template_code.into(),
            international_template_code: None,
        }
    }

    pub fn with_international_code(mut self, code: impl Into<String>) -> Self {
        self.international_template_code = Some(code.into());
        self
    }

    /// Template code to use for a recipient.
    ///
    /// International recipients fall back to the domestic code when no
    /// international code is configured.
    pub fn template_code_for(&self, is_domestic: bool) -> &str {
        if is_domestic {
            &self.template_code
        } else {
            self.international_template_code
                .as_deref()
                .unwrap_or(&self.template_code)
        }
    }
}
