//! Mock SMS Connector Implementation
//!
//! A development connector that runs the same configuration validation and
//! template selection as a real provider, then records the message instead
//! of sending it.

use async_trait::async_trait;
use serde_json::{json, Value};
use sg_core::{
    ConfigResolver, ConnectorError, ConnectorResult, SendMessageRequest, SendReceipt,
    SmsConnector, UsageType,
};
use sg_shared::phone::{has_country_code, is_valid_phone, mask_phone_number, HOME_COUNTRY_CODE};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};
use uuid::Uuid;

use super::resolve_connector_config;

/// A message accepted by [`MockSmsConnector`]
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub message_id: String,
    pub to: String,
    pub usage_type: UsageType,
    pub template_code: String,
    pub template_param: String,
}

/// Mock SMS connector for development and testing
///
/// This implementation:
/// - Validates configuration and selects templates like a real connector
/// - Rejects malformed destination numbers with a provider-style error
/// - Records accepted messages and can simulate provider failures
#[derive(Clone)]
pub struct MockSmsConnector {
    connector_id: String,
    resolver: Arc<dyn ConfigResolver>,
    sent: Arc<Mutex<Vec<SentMessage>>>,
    simulate_failure: Arc<AtomicBool>,
    console_output: bool,
    home_country_code: String,
}

impl MockSmsConnector {
    pub fn new(connector_id: impl Into<String>, resolver: Arc<dyn ConfigResolver>) -> Self {
        Self {
            connector_id: connector_id.into(),
            resolver,
            sent: Arc::new(Mutex::new(Vec::new())),
            simulate_failure: Arc::new(AtomicBool::new(false)),
            console_output: false,
            home_country_code: HOME_COUNTRY_CODE.to_string(),
        }
    }

    /// Override the country calling code treated as domestic
    pub fn with_home_country_code(mut self, code: impl Into<String>) -> Self {
        self.home_country_code = code.into();
        self
    }

    /// Print accepted messages to stdout (local development)
    pub fn with_console_output(mut self, enabled: bool) -> Self {
        self.console_output = enabled;
        self
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Messages accepted so far
    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn message_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[async_trait]
impl SmsConnector for MockSmsConnector {
    async fn send_message(
        &self,
        request: &SendMessageRequest,
        config: Option<Value>,
    ) -> ConnectorResult<SendReceipt> {
        let config =
            resolve_connector_config(self.resolver.as_ref(), &self.connector_id, config).await?;
        let template_code = config
            .template_code_for(
                request.usage_type,
                has_country_code(&request.to, &self.home_country_code),
            )?
            .to_string();

        let masked_phone = mask_phone_number(&request.to);

        if !is_valid_phone(&request.to) {
            return Err(ConnectorError::general(
                "isv.MOBILE_NUMBER_ILLEGAL",
                format!("Invalid phone number: {}", masked_phone),
            ));
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(phone = %masked_phone, "Mock SMS connector simulating failure");
            return Err(ConnectorError::general(
                "isv.BUSINESS_LIMIT_CONTROL",
                "Simulated SMS sending failure",
            ));
        }

        let message = SentMessage {
            message_id: format!("mock_{}", Uuid::new_v4()),
            to: request.to.clone(),
            usage_type: request.usage_type,
            template_code,
            template_param: request.template_param(),
        };
        let request_id = Uuid::new_v4().to_string();

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK SMS [{}] to {}", message.usage_type, masked_phone);
            println!("Template: {}", message.template_code);
            println!("Params:   {}", message.template_param);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "sms_connector",
            provider = "mock",
            phone = %masked_phone,
            message_id = %message.message_id,
            template_code = %message.template_code,
            "SMS recorded (mock)"
        );

        let body = json!({
            "Code": "OK",
            "Message": "OK",
            "RequestId": request_id,
            "BizId": message.message_id,
        })
        .to_string();
        let biz_id = message.message_id.clone();

        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);

        Ok(SendReceipt {
            status: 200,
            body,
            request_id: Some(request_id),
            biz_id: Some(biz_id),
        })
    }

    fn connector_id(&self) -> &str {
        &self.connector_id
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
