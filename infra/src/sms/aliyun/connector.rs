//! Aliyun SMS connector
//!
//! Adapts [`SmsConnector::send_message`] to the Aliyun `SendSms` API:
//! resolves and validates the connector configuration, picks the template
//! for the usage type and destination, then performs one signed request.

use async_trait::async_trait;
use serde_json::Value;
use sg_core::{ConfigResolver, ConnectorResult, SendMessageRequest, SendReceipt, SmsConnector};
use sg_shared::phone::{has_country_code, mask_phone_number, HOME_COUNTRY_CODE};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::client::{AliyunClient, ReqwestTransport, SendSmsParameters};
use super::response;
use crate::config::SmsConfig;
use crate::sms::resolve_connector_config;
use crate::InfrastructureError;

/// Connector sending messages through Aliyun SMS
pub struct AliyunSmsConnector {
    connector_id: String,
    client: AliyunClient,
    resolver: Arc<dyn ConfigResolver>,
    home_country_code: String,
}

impl AliyunSmsConnector {
    pub fn new(
        connector_id: impl Into<String>,
        client: AliyunClient,
        resolver: Arc<dyn ConfigResolver>,
    ) -> Self {
        Self {
            connector_id: connector_id.into(),
            client,
            resolver,
            home_country_code: HOME_COUNTRY_CODE.to_string(),
        }
    }

    /// Build a connector talking to the endpoint in `settings` over `reqwest`
    pub fn from_settings(
        settings: &SmsConfig,
        resolver: Arc<dyn ConfigResolver>,
    ) -> Result<Self, InfrastructureError> {
        settings.validate()?;
        let transport =
            ReqwestTransport::new(Duration::from_secs(settings.request_timeout_secs))?;
        let client = AliyunClient::new(
            Arc::new(transport),
            settings.endpoint.clone(),
            settings.region_id.clone(),
        );

        info!(
            connector_id = %settings.connector_id,
            endpoint = %settings.endpoint,
            "Aliyun SMS connector initialized"
        );

        Ok(Self::new(settings.connector_id.clone(), client, resolver)
            .with_home_country_code(settings.home_country_code.clone()))
    }

    /// Override the country calling code treated as domestic
    pub fn with_home_country_code(mut self, code: impl Into<String>) -> Self {
        self.home_country_code = code.into();
        self
    }
}

#[async_trait]
impl SmsConnector for AliyunSmsConnector {
    async fn send_message(
        &self,
        request: &SendMessageRequest,
        config: Option<Value>,
    ) -> ConnectorResult<SendReceipt> {
        let config = resolve_connector_config(self.resolver.as_ref(), &self.connector_id, config)
            .await
            .map_err(|e| {
                warn!(connector_id = %self.connector_id, error = %e, "Rejected connector configuration");
                e
            })?;

        let is_domestic = has_country_code(&request.to, &self.home_country_code);
        let template_code = config.template_code_for(request.usage_type, is_domestic)?;

        let masked = mask_phone_number(&request.to);
        info!(
            phone = %masked,
            usage_type = %request.usage_type,
            template_code = %template_code,
            domestic = is_domestic,
            "Sending SMS via Aliyun"
        );

        let params = SendSmsParameters {
            access_key_id: config.access_key_id.clone(),
            phone_numbers: request.to.clone(),
            sign_name: config.sign_name.clone(),
            template_code: template_code.to_string(),
            template_param: Some(request.template_param()),
        };

        let result = self
            .client
            .send_sms(&params, &config.access_key_secret)
            .await;

        match response::interpret(result) {
            Ok(receipt) => {
                info!(
                    phone = %masked,
                    request_id = receipt.request_id.as_deref().unwrap_or_default(),
                    biz_id = receipt.biz_id.as_deref().unwrap_or_default(),
                    "SMS accepted by Aliyun"
                );
                Ok(receipt)
            }
            Err(e) => {
                warn!(phone = %masked, kind = e.code(), error = %e, "Aliyun SMS send failed");
                Err(e)
            }
        }
    }

    fn connector_id(&self) -> &str {
        &self.connector_id
    }

    fn provider_name(&self) -> &str {
        "Aliyun"
    }
}
