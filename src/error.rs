//! Error type shared by the auth session layer.
//!
//! ERROR HANDLING
//! ==============
//! Session checks absorb every variant into "unauthenticated" state. Only
//! user-initiated form actions (sign-in, sign-up, password flows) surface an
//! `AuthError` to the page, where `Display` is shown to the user verbatim.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

/// Shown when the backend error body has no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("malformed session token")]
    Decode,
    #[error("session storage error: {0}")]
    Storage(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("not available outside the browser")]
    Unavailable,
    #[error("not authenticated")]
    NotAuthenticated,
}

impl AuthError {
    /// Build an HTTP error from a non-OK response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Http { status, message: server_error_message(body) }
    }

    /// HTTP status for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Extract the human-readable message from a backend error body.
///
/// Accepts `{"message": "..."}`, `{"message": ["...", ...]}` and
/// `{"error": "..."}`; anything else yields [`GENERIC_ERROR_MESSAGE`].
pub fn server_error_message(body: &str) -> String {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
        return GENERIC_ERROR_MESSAGE.to_owned();
    };
    let from_value = |value: &Value| match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.as_str().filter(|s| !s.trim().is_empty()).map(str::to_owned)),
        _ => None,
    };
    map.get("message")
        .and_then(from_value)
        .or_else(|| map.get("error").and_then(from_value))
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_owned())
}
