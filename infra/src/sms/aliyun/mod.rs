//! Aliyun SMS (Dysms) connector
//!
//! - `signature` - canonical query and HMAC-SHA1 request signature
//! - `client` - signed `SendSms` calls over a pluggable HTTP transport
//! - `response` - response schema and error mapping
//! - `connector` - the [`sg_core::SmsConnector`] implementation

pub mod client;
pub mod connector;
pub mod response;
pub mod signature;

pub use client::{
    format_timestamp, AliyunClient, HttpResponse, HttpTransport, ReqwestTransport,
    SendSmsParameters, SEND_SMS_ACTION,
};
pub use connector::AliyunSmsConnector;
pub use response::{check_response, interpret, parse_response, SendSmsResponse};
pub use signature::{canonical_query, escape, sign, signed_parameters, string_to_sign, Parameters};
