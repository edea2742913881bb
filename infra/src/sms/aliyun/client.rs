//! Signed HTTP calls to the Aliyun SMS API

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use super::signature::{signed_parameters, Parameters};
use crate::InfrastructureError;

/// API action sending a message
pub const SEND_SMS_ACTION: &str = "SendSms";
/// API version the parameters follow
pub const API_VERSION: &str = "2017-05-25";
/// Response format requested from the API
pub const RESPONSE_FORMAT: &str = "json";
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const SIGNATURE_VERSION: &str = "1.0";

const HTTP_METHOD: &str = "POST";

/// Status and body of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Minimal HTTP interface used by [`AliyunClient`]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST `form` as `application/x-www-form-urlencoded` to `endpoint`.
    ///
    /// Non-2xx responses are returned as [`InfrastructureError::HttpStatus`]
    /// carrying the response body.
    async fn post_form(
        &self,
        endpoint: &str,
        form: &[(String, String)],
    ) -> Result<HttpResponse, InfrastructureError>;
}

/// [`HttpTransport`] backed by `reqwest`
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(request_timeout: Duration) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_form(
        &self,
        endpoint: &str,
        form: &[(String, String)],
    ) -> Result<HttpResponse, InfrastructureError> {
        let response = self.client.post(endpoint).form(form).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        if !(200..300).contains(&status) {
            return Err(InfrastructureError::HttpStatus { status, body });
        }

        Ok(HttpResponse { status, body })
    }
}

/// Call-specific parameters of a `SendSms` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSmsParameters {
    pub access_key_id: String,
    pub phone_numbers: String,
    pub sign_name: String,
    pub template_code: String,
    pub template_param: Option<String>,
}

impl SendSmsParameters {
    pub fn to_parameters(&self) -> Parameters {
        let mut map = Parameters::new();
        map.insert("AccessKeyId".into(), Some(self.access_key_id.clone()));
        map.insert("PhoneNumbers".into(), Some(self.phone_numbers.clone()));
        map.insert("SignName".into(), Some(self.sign_name.clone()));
        map.insert("TemplateCode".into(), Some(self.template_code.clone()));
        map.insert("TemplateParam".into(), self.template_param.clone());
        map
    }
}

/// Client for the Aliyun SMS RPC API.
///
/// Performs exactly one HTTP request per call; no retries.
#[derive(Clone)]
pub struct AliyunClient {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
    region_id: String,
}

impl AliyunClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        endpoint: impl Into<String>,
        region_id: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            region_id: region_id.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full, signed parameter set for `action` with a fixed nonce and timestamp
    pub fn build_signed_parameters(
        &self,
        action: &str,
        mut params: Parameters,
        access_key_secret: &str,
        nonce: &str,
        timestamp: &str,
    ) -> Result<Parameters, InfrastructureError> {
        params.insert("Action".into(), Some(action.to_string()));
        params.insert("Format".into(), Some(RESPONSE_FORMAT.to_string()));
        params.insert("RegionId".into(), Some(self.region_id.clone()));
        params.insert("SignatureMethod".into(), Some(SIGNATURE_METHOD.to_string()));
        params.insert("SignatureVersion".into(), Some(SIGNATURE_VERSION.to_string()));
        params.insert("Version".into(), Some(API_VERSION.to_string()));
        params.insert("SignatureNonce".into(), Some(nonce.to_string()));
        params.insert("Timestamp".into(), Some(timestamp.to_string()));

        signed_parameters(params, access_key_secret, HTTP_METHOD)
    }

    /// Sign and POST `action` with a fresh nonce and timestamp
    pub async fn request(
        &self,
        action: &str,
        params: Parameters,
        access_key_secret: &str,
    ) -> Result<HttpResponse, InfrastructureError> {
        let nonce = Uuid::new_v4().to_string();
        let timestamp = format_timestamp(Utc::now());
        let signed =
            self.build_signed_parameters(action, params, access_key_secret, &nonce, &timestamp)?;

        let form: Vec<(String, String)> = signed
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .collect();

        debug!(
            action = %action,
            endpoint = %self.endpoint,
            nonce = %nonce,
            "Sending signed Aliyun request"
        );

        self.transport.post_form(&self.endpoint, &form).await
    }

    /// Issue a `SendSms` request
    pub async fn send_sms(
        &self,
        params: &SendSmsParameters,
        access_key_secret: &str,
    ) -> Result<HttpResponse, InfrastructureError> {
        self.request(SEND_SMS_ACTION, params.to_parameters(), access_key_secret)
            .await
    }
}

/// ISO-8601 UTC timestamp with millisecond precision, e.g.
/// `2024-05-01T08:30:00.000Z`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
