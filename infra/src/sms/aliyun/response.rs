//! Interpretation of Aliyun SMS API responses

use serde::{Deserialize, Serialize};
use sg_core::{ConnectorError, ConnectorResult, SendReceipt};

use super::client::HttpResponse;
use crate::InfrastructureError;

/// `Code` value of a successful call
pub const SUCCESS_CODE: &str = "OK";

/// Body of a `SendSms` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendSmsResponse {
    pub code: String,
    pub message: String,
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biz_id: Option<String>,
}

impl SendSmsResponse {
    pub fn is_ok(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Parse a response body against the response schema
pub fn parse_response(body: &str) -> ConnectorResult<SendSmsResponse> {
    serde_json::from_str(body).map_err(|e| ConnectorError::invalid_response(e.to_string()))
}

/// Parse a response body and reject non-OK codes
pub fn check_response(body: &str) -> ConnectorResult<SendSmsResponse> {
    let response = parse_response(body)?;
    if !response.is_ok() {
        return Err(ConnectorError::general(response.code, response.message));
    }
    Ok(response)
}

/// Map the outcome of a transport call to a receipt or connector error.
///
/// - 2xx: the body must parse and carry `Code == "OK"`
/// - non-2xx with a body: the body is parsed the same way and reported as
///   [`ConnectorError::General`] (or `InvalidResponse` if it does not parse)
/// - anything else propagates as [`ConnectorError::Transport`]
pub fn interpret(
    result: Result<HttpResponse, InfrastructureError>,
) -> ConnectorResult<SendReceipt> {
    match result {
        Ok(response) => {
            let parsed = check_response(&response.body)?;
            Ok(SendReceipt {
                status: response.status,
                body: response.body,
                request_id: Some(parsed.request_id),
                biz_id: parsed.biz_id,
            })
        }
        Err(InfrastructureError::HttpStatus { body, .. }) => {
            let parsed = parse_response(&body)?;
            Err(ConnectorError::general(parsed.code, parsed.message))
        }
        Err(other) => Err(other.into()),
    }
}
