//! Test doubles shared by the SMS tests

use serde_json::{json, Value};
use std::sync::Arc;

use crate::sms::StaticConfigResolver;

pub const CONNECTOR_ID: &str = "aliyun-sms-test";

/// Valid connector configuration covering every usage type except `Test`
pub fn connector_config() -> Value {
    json!({
        "accessKeyId": "LTAI-test-id",
        "accessKeySecret": "test-secret",
        "signName": "SmsGate",
        "templates": [
            { "usageType": "Register", "templateCode": "SMS_0001", "internationalTemplateCode": "SMS_1001" },
            { "usageType": "SignIn", "templateCode": "SMS_0002", "internationalTemplateCode": "SMS_1002" },
            { "usageType": "ForgotPassword", "templateCode": "SMS_0003", "internationalTemplateCode": "SMS_1003" },
            { "usageType": "Generic", "templateCode": "SMS_0004" }
        ]
    })
}

pub fn static_resolver() -> Arc<StaticConfigResolver> {
    Arc::new(StaticConfigResolver::with_config(CONNECTOR_ID, connector_config()))
}

#[cfg(feature = "aliyun-sms")]
pub use transport::*;

#[cfg(feature = "aliyun-sms")]
mod transport {
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    use crate::sms::aliyun::{HttpResponse, HttpTransport};
    use crate::InfrastructureError;

    type Reply = Box<dyn Fn() -> Result<HttpResponse, InfrastructureError> + Send + Sync>;

    /// One captured POST
    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        pub endpoint: String,
        pub form: Vec<(String, String)>,
    }

    impl RecordedCall {
        pub fn param(&self, key: &str) -> Option<&str> {
            self.form
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        }
    }

    /// Transport that records requests and answers with a scripted reply
    pub struct RecordingTransport {
        calls: Mutex<Vec<RecordedCall>>,
        reply: Reply,
    }

    impl RecordingTransport {
        pub fn replying(reply: impl Fn() -> Result<HttpResponse, InfrastructureError> + Send + Sync + 'static) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply: Box::new(reply),
            })
        }

        /// Always answers 200 with `body`
        pub fn ok(body: &str) -> Arc<Self> {
            let body = body.to_string();
            Self::replying(move || {
                Ok(HttpResponse {
                    status: 200,
                    body: body.clone(),
                })
            })
        }

        /// Always answers with a non-2xx `status` and `body`
        pub fn status(status: u16, body: &str) -> Arc<Self> {
            let body = body.to_string();
            Self::replying(move || {
                Err(InfrastructureError::HttpStatus {
                    status,
                    body: body.clone(),
                })
            })
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HttpTransport for RecordingTransport {
        async fn post_form(
            &self,
            endpoint: &str,
            form: &[(String, String)],
        ) -> Result<HttpResponse, InfrastructureError> {
            self.calls.lock().unwrap().push(RecordedCall {
                endpoint: endpoint.to_string(),
                form: form.to_vec(),
            });
            (self.reply)()
        }
    }
}
