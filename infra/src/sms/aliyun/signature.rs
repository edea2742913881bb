//! Aliyun RPC-style request signing (signature version 1.0, HMAC-SHA1)
//!
//! The string to sign is
//! `METHOD & escape("/") & escape(canonical_query)` where the canonical
//! query is the `escape(key)=escape(value)` pairs sorted as plain strings
//! and joined with `&`. The key is the access key secret followed by `&`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;
use std::collections::BTreeMap;

use crate::InfrastructureError;

type HmacSha1 = Hmac<Sha1>;

/// Request parameters; `None` values are left out of the signature and the body
pub type Parameters = BTreeMap<String, Option<String>>;

/// Name of the parameter carrying the signature
pub const SIGNATURE_PARAM: &str = "Signature";

// Only RFC 3986 unreserved characters stay literal. This is
// encodeURIComponent with `! ' ( ) *` re-encoded (`"` and `+` are already
// encoded by it).
const POP_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode `input` the way the Aliyun signature expects
pub fn escape(input: &str) -> String {
    utf8_percent_encode(input, POP_ENCODE_SET).to_string()
}

/// Canonical query string of `params`.
///
/// Sorting happens on the encoded `key=value` strings, not on the keys.
pub fn canonical_query(params: &Parameters) -> String {
    let mut pairs: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .map(|value| format!("{}={}", escape(key), escape(value)))
        })
        .collect();
    pairs.sort();
    pairs.join("&")
}

/// String to sign for an HTTP `method` and a canonical query
pub fn string_to_sign(method: &str, canonical_query: &str) -> String {
    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        escape("/"),
        escape(canonical_query)
    )
}

/// Base64 HMAC-SHA1 of `string_to_sign`, keyed with `secret + "&"`
pub fn sign(secret: &str, string_to_sign: &str) -> Result<String, InfrastructureError> {
    let key = format!("{}&", secret);
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| InfrastructureError::Signing(format!("Invalid signing key: {}", e)))?;
    mac.update(string_to_sign.as_bytes());

    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// `params` plus the `Signature` computed over them
pub fn signed_parameters(
    mut params: Parameters,
    secret: &str,
    method: &str,
) -> Result<Parameters, InfrastructureError> {
    params.remove(SIGNATURE_PARAM);
    let to_sign = string_to_sign(method, &canonical_query(&params));
    let signature = sign(secret, &to_sign)?;
    params.insert(SIGNATURE_PARAM.to_string(), Some(signature));
    Ok(params)
}
