//! Integration tests for the SMS connectors through the public API

use async_trait::async_trait;
use serde_json::{json, Value};
use sg_infra::config::SmsConfig;
use sg_infra::sms::{
    create_sms_connector, AliyunClient, AliyunSmsConnector, FileConfigResolver, HttpTransport,
    StaticConfigResolver,
};
use sg_infra::sms::aliyun::HttpResponse;
use sg_infra::{ConnectorError, InfrastructureError, SendMessageRequest, SmsConnector, UsageType};
use std::sync::{Arc, Mutex};

fn tenant_config() -> Value {
    json!({
        "accessKeyId": "LTAI-integration",
        "accessKeySecret": "integration-secret",
        "signName": "SmsGate",
        "templates": [
            { "usageType": "Register", "templateCode": "SMS_100", "internationalTemplateCode": "SMS_200" },
            { "usageType": "SignIn", "templateCode": "SMS_101", "internationalTemplateCode": "SMS_201" },
            { "usageType": "ForgotPassword", "templateCode": "SMS_102" }
        ]
    })
}

/// Answers every POST with a fixed response and keeps the forms
struct FakeGateway {
    forms: Mutex<Vec<Vec<(String, String)>>>,
    status: u16,
    body: String,
}

impl FakeGateway {
    fn new(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            forms: Mutex::new(Vec::new()),
            status,
            body: body.to_string(),
        })
    }

    fn last_param(&self, key: &str) -> Option<String> {
        let forms = self.forms.lock().unwrap();
        forms
            .last()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn count(&self) -> usize {
        self.forms.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for FakeGateway {
    async fn post_form(
        &self,
        _endpoint: &str,
        form: &[(String, String)],
    ) -> Result<HttpResponse, InfrastructureError> {
        self.forms.lock().unwrap().push(form.to_vec());
        if (200..300).contains(&self.status) {
            Ok(HttpResponse {
                status: self.status,
                body: self.body.clone(),
            })
        } else {
            Err(InfrastructureError::HttpStatus {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }
}

fn aliyun(gateway: Arc<FakeGateway>) -> AliyunSmsConnector {
    let resolver = StaticConfigResolver::with_config("tenant-a", tenant_config());
    let client = AliyunClient::new(gateway, "https://sms.example.test/", "cn-hangzhou");
    AliyunSmsConnector::new("tenant-a", client, Arc::new(resolver))
}

#[tokio::test]
async fn test_send_verification_code_end_to_end() {
    let gateway = FakeGateway::new(
        200,
        r#"{"Code":"OK","Message":"OK","RequestId":"A1B2","BizId":"900619746936498440^0"}"#,
    );
    let connector = aliyun(gateway.clone());

    let request = SendMessageRequest::new(
        "+8613800138000",
        UsageType::Register,
        json!({ "code": "246810" }),
    );
    let receipt = connector.send_message(&request, None).await.unwrap();

    assert_eq!(receipt.request_id.as_deref(), Some("A1B2"));
    assert_eq!(receipt.biz_id.as_deref(), Some("900619746936498440^0"));
    assert_eq!(gateway.count(), 1);
    assert_eq!(gateway.last_param("TemplateCode").as_deref(), Some("SMS_100"));
    assert_eq!(
        gateway.last_param("TemplateParam").as_deref(),
        Some(r#"{"code":"246810"}"#)
    );
    assert!(gateway.last_param("Signature").is_some());
}

#[tokio::test]
async fn test_provider_rejection_surfaces_as_general_error() {
    let gateway = FakeGateway::new(
        400,
        r#"{"Code":"isv.AMOUNT_NOT_ENOUGH","Message":"balance","RequestId":"C3"}"#,
    );
    let connector = aliyun(gateway);

    let request = SendMessageRequest::new("+447700900123", UsageType::SignIn, json!({}));
    match connector.send_message(&request, None).await {
        Err(ConnectorError::General { code, message }) => {
            assert_eq!(code, "isv.AMOUNT_NOT_ENOUGH");
            assert_eq!(message, "balance");
        }
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_file_backed_configuration_with_factory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("tenant-b.json"),
        serde_json::to_vec_pretty(&tenant_config()).unwrap(),
    )
    .unwrap();

    let settings = SmsConfig {
        provider: "mock".to_string(),
        connector_id: "tenant-b".to_string(),
        config_dir: dir.path().display().to_string(),
        ..SmsConfig::default()
    };
    let resolver = Arc::new(FileConfigResolver::new(&settings.config_dir));
    let connector = create_sms_connector(&settings, resolver);

    let request = SendMessageRequest::new("8613800138000", UsageType::ForgotPassword, json!({}));
    let receipt = connector.send_message(&request, None).await.unwrap();
    assert_eq!(receipt.status, 200);

    let unknown = SendMessageRequest::new("8613800138000", UsageType::Generic, json!({}));
    let err = connector.send_message(&unknown, None).await.unwrap_err();
    assert_eq!(err.code(), "TEMPLATE_NOT_FOUND");
}
