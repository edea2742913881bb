//! Phone number utilities
//!
//! Destination numbers arrive country-code-prefixed, with or without a
//! leading `+` (e.g. `+8613812345678` or `8613812345678`).

use once_cell::sync::Lazy;
use regex::Regex;

/// Country calling code treated as domestic by the SMS connectors
pub const HOME_COUNTRY_CODE: &str = "86";

// E.164 digits, leading '+' optional
static COUNTRY_PREFIXED_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[1-9]\d{6,14}$").expect("phone regex is valid")
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is a plausible country-code-prefixed number
pub fn is_valid_phone(phone: &str) -> bool {
    COUNTRY_PREFIXED_PHONE_REGEX.is_match(&normalize_phone_number(phone))
}

/// Check whether `phone` starts with the given country calling code.
///
/// The comparison is a plain prefix match on the digits after an optional
/// leading `+`, so an empty `country_code` matches every number. Callers
/// taking the code from settings reject empty values up front.
pub fn has_country_code(phone: &str, country_code: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    normalized
        .strip_prefix('+')
        .unwrap_or(&normalized)
        .starts_with(country_code)
}

/// Mask a phone number for logs (e.g. `+86****5678`)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
