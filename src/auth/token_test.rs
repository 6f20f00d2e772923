use super::*;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};

const NOW: i64 = 1_700_000_000;

fn token_with(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.c2lnbmF0dXJl")
}

// =============================================================
// decode
// =============================================================

#[test]
fn decode_reads_exp_iat_and_marks_valid() {
    let token = token_with(&serde_json::json!({ "sub": "42", "exp": NOW + 60, "iat": NOW }));
    let claims = decode(&token).unwrap();
    assert_eq!(claims.exp, Some(NOW + 60));
    assert_eq!(claims.iat, Some(NOW));
    assert_eq!(claims.claims.get("sub"), Some(&Value::from("42")));
    assert!(claims.valid);
}

#[test]
fn decode_accepts_padded_payload() {
    let header = URL_SAFE.encode(b"{}");
    let body = URL_SAFE.encode(br#"{"exp":1}"#);
    let claims = decode(&format!("{header}.{body}.sig")).unwrap();
    assert_eq!(claims.exp, Some(1));
}

#[test]
fn decode_floors_fractional_timestamps() {
    let token = token_with(&serde_json::json!({ "exp": 1_700_000_000.9 }));
    assert_eq!(decode(&token).unwrap().exp, Some(1_700_000_000));
}

#[test]
fn decode_rejects_wrong_segment_count() {
    assert!(decode("").is_none());
    assert!(decode("abc").is_none());
    assert!(decode("a.b").is_none());
    assert!(decode("a.b.c.d").is_none());
}

#[test]
fn decode_rejects_bad_base64() {
    assert!(decode("head.!!not-base64!!.sig").is_none());
}

#[test]
fn decode_rejects_non_json_and_non_object_payloads() {
    let not_json = URL_SAFE_NO_PAD.encode("not json");
    assert!(decode(&format!("h.{not_json}.s")).is_none());
    let array = URL_SAFE_NO_PAD.encode("[1,2]");
    assert!(decode(&format!("h.{array}.s")).is_none());
}

// =============================================================
// is_valid / is_valid_at
// =============================================================

#[test]
fn expired_token_is_invalid() {
    let token = token_with(&serde_json::json!({ "exp": NOW - 1 }));
    assert!(!is_valid_at(&token, NOW));
}

#[test]
fn future_exp_is_valid() {
    let token = token_with(&serde_json::json!({ "exp": NOW + 3600 }));
    assert!(is_valid_at(&token, NOW));
}

#[test]
fn exp_equal_to_now_is_still_valid() {
    let token = token_with(&serde_json::json!({ "exp": NOW }));
    assert!(is_valid_at(&token, NOW));
}

#[test]
fn missing_exp_never_expires() {
    let token = token_with(&serde_json::json!({ "sub": "7" }));
    assert!(is_valid_at(&token, NOW));
    assert!(is_valid_at(&token, i64::MAX));
}

#[test]
fn empty_and_malformed_tokens_are_invalid() {
    assert!(!is_valid(""));
    assert!(!is_valid("only.two"));
    assert!(!is_valid("one.two.three.four"));
    assert!(!is_valid("no-dots-at-all"));
}

#[test]
fn is_valid_uses_wall_clock() {
    let past = token_with(&serde_json::json!({ "exp": 1_000 }));
    let far_future = token_with(&serde_json::json!({ "exp": 32_503_680_000_i64 }));
    assert!(!is_valid(&past));
    assert!(is_valid(&far_future));
}

// =============================================================
// expires_within
// =============================================================

#[test]
fn expires_within_window() {
    let token = token_with(&serde_json::json!({ "exp": NOW + 120 }));
    assert!(expires_within(&token, NOW, 300));
    assert!(!expires_within(&token, NOW, 60));
}

#[test]
fn expires_within_is_false_without_exp_or_on_garbage() {
    let token = token_with(&serde_json::json!({ "sub": "1" }));
    assert!(!expires_within(&token, NOW, 300));
    assert!(!expires_within("garbage", NOW, 300));
}

#[test]
fn expires_within_handles_extreme_exp() {
    let past = token_with(&serde_json::json!({ "exp": i64::MIN }));
    assert!(expires_within(&past, NOW, 300));
    let future = token_with(&serde_json::json!({ "exp": i64::MAX }));
    assert!(!expires_within(&future, NOW, 300));
    assert!(!expires_within(&future, i64::MIN, 300));
}
