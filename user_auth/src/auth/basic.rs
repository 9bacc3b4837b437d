//! Basic-authorization header decoding.
//!
//! Extracts `(email, password)` credential pairs from an
//! `Authorization: Basic <base64>` header value. Any header that does not
//! carry the `Basic` scheme, fails to decode, or does not contain a `:`
//! separator yields `None`, and the caller falls back to its other
//! credential sources.

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Strip the `Basic ` scheme prefix and return the base64 payload.
///
/// Returns `None` for any other scheme or an empty payload.
pub fn extract_base64_authorization(header: &str) -> Option<&str> {
    let payload = header.strip_prefix("Basic ")?.trim();
    if payload.is_empty() { None } else { Some(payload) }
}

/// Decode an `Authorization: Basic` header value into `(email, password)`.
///
/// The payload is split on the first `:`, so passwords may themselves
/// contain colons.
pub fn decode_credentials(header: &str) -> Option<(String, String)> {
    let payload = extract_base64_authorization(header)?;
    let decoded = STANDARD.decode(payload).ok()?;
    let text = String::from_utf8(decoded).ok()?;

    let (email, password) = text.split_once(':')?;
    if email.is_empty() {
        return None;
    }

    Some((email.to_string(), password.to_string()))
}
