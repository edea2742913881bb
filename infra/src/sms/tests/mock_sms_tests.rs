//! Unit tests for Mock SMS Connector

use serde_json::json;
use sg_core::{ConnectorError, SendMessageRequest, SmsConnector, UsageType};
use tokio_test::{assert_err, assert_ok};

use super::mocks::{connector_config, static_resolver, CONNECTOR_ID};
use crate::sms::MockSmsConnector;

fn mock() -> MockSmsConnector {
    MockSmsConnector::new(CONNECTOR_ID, static_resolver())
}

fn register(to: &str) -> SendMessageRequest {
    SendMessageRequest::new(to, UsageType::Register, json!({ "code": "654321" }))
}

#[tokio::test]
async fn test_mock_records_sent_message() {
    let sms = mock();

    let receipt = assert_ok!(sms.send_message(&register("+8613812345678"), None).await);
    assert_eq!(receipt.status, 200);
    assert!(receipt.body.contains(r#""Code":"OK""#));

    let sent = sms.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "+8613812345678");
    assert_eq!(sent[0].usage_type, UsageType::Register);
    assert_eq!(sent[0].template_code, "SMS_0001");
    assert_eq!(sent[0].template_param, r#"{"code":"654321"}"#);
    assert_eq!(receipt.biz_id.as_deref(), Some(sent[0].message_id.as_str()));
}

#[tokio::test]
async fn test_mock_selects_international_template() {
    let sms = mock();

    assert_ok!(sms.send_message(&register("+14155552671"), None).await);
    assert_eq!(sms.sent_messages()[0].template_code, "SMS_1001");
}

#[tokio::test]
async fn test_mock_rejects_invalid_phone() {
    let sms = mock();

    let err = assert_err!(sms.send_message(&register("86123"), None).await);
    assert_eq!(err.provider_code(), Some("isv.MOBILE_NUMBER_ILLEGAL"));
    assert_eq!(sms.message_count(), 0);
}

#[tokio::test]
async fn test_mock_simulated_failure() {
    let sms = mock();
    sms.set_simulate_failure(true);

    let err = assert_err!(sms.send_message(&register("8613812345678"), None).await);
    assert_eq!(err.provider_code(), Some("isv.BUSINESS_LIMIT_CONTROL"));
    assert_eq!(sms.message_count(), 0);

    sms.set_simulate_failure(false);
    assert_ok!(sms.send_message(&register("8613812345678"), None).await);
    assert_eq!(sms.message_count(), 1);
}

#[tokio::test]
async fn test_mock_validates_config() {
    let sms = mock();
    let mut config = connector_config();
    config.as_object_mut().unwrap().remove("accessKeySecret");

    let err = assert_err!(sms.send_message(&register("8613812345678"), Some(config)).await);
    assert!(matches!(err, ConnectorError::InvalidConfig { .. }));
}

#[tokio::test]
async fn test_mock_template_not_found() {
    let sms = mock();
    let request = SendMessageRequest::new("8613812345678", UsageType::Test, json!({}));

    let err = assert_err!(sms.send_message(&request, None).await);
    assert_eq!(err.code(), "TEMPLATE_NOT_FOUND");
}

#[tokio::test]
async fn test_mock_clear_and_shared_state() {
    let sms = mock();
    let handle = sms.clone();

    sms.send_message(&register("8613812345678"), None).await.unwrap();
    sms.send_message(&register("8613812345679"), None).await.unwrap();
    assert_eq!(handle.message_count(), 2);

    handle.clear();
    assert_eq!(sms.message_count(), 0);
}

#[test]
fn test_mock_identity() {
    let sms = mock().with_console_output(true);
    assert_eq!(sms.connector_id(), CONNECTOR_ID);
    assert_eq!(sms.provider_name(), "Mock");
}
