//! Bearer token decoding and local expiry checks.
//!
//! DESIGN
//! ======
//! Only the claims segment is read; the signature is never verified. A
//! decoded token is a hint about session lifetime, not proof of identity:
//! the backend stays the authority on every request.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::{Map, Value};

use crate::util::time::now_secs;

/// base64url with or without trailing `=` padding.
const CLAIMS_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &base64::alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Claims decoded from the payload segment of a session token.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenClaims {
    /// Expiry in epoch seconds, if present.
    pub exp: Option<i64>,
    /// Issued-at in epoch seconds, if present.
    pub iat: Option<i64>,
    /// Every claim as sent by the backend.
    pub claims: Map<String, Value>,
    /// Always `true` on decoded claims.
    pub valid: bool,
}

/// Decode the payload of a three-part `header.payload.signature` token.
///
/// Returns `None` for a wrong segment count, bad base64 or a payload that is
/// not a JSON object.
pub fn decode(token: &str) -> Option<TokenClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return None;
    };
    let bytes = CLAIMS_ENGINE.decode(payload).ok()?;
    let Value::Object(claims) = serde_json::from_slice::<Value>(&bytes).ok()? else {
        return None;
    };
    Some(TokenClaims {
        exp: claims.get("exp").and_then(epoch_secs),
        iat: claims.get("iat").and_then(epoch_secs),
        claims,
        valid: true,
    })
}

/// Whether `token` decodes and has not expired by the wall clock.
pub fn is_valid(token: &str) -> bool {
    is_valid_at(token, now_secs())
}

/// Whether `token` decodes and has not expired at `now` (epoch seconds).
///
/// A token without an `exp` claim never expires.
pub fn is_valid_at(token: &str, now: i64) -> bool {
    if token.is_empty() {
        return false;
    }
    match decode(token) {
        Some(claims) => claims.exp.is_none_or(|exp| exp >= now),
        None => false,
    }
}

/// Whether `token` carries an `exp` no more than `window` seconds after `now`.
pub fn expires_within(token: &str, now: i64, window: i64) -> bool {
    decode(token)
        .and_then(|claims| claims.exp)
        .is_some_and(|exp| exp.saturating_sub(now) <= window)
}

#[allow(clippy::cast_possible_truncation)]
fn epoch_secs(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_f64().map(|secs| secs.floor() as i64))
}
