//! Install or tear down the bearer token in storage and on the HTTP client.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use super::storage::TokenStorage;
use crate::error::AuthError;
use crate::net::client::ApiClient;

/// `Some(token)`: persist it under `key` and send it on every request.
/// `None`: remove the stored token and the default header.
///
/// # Errors
///
/// Propagates the storage error. The client header is only touched after the
/// storage write succeeded.
pub fn set_session<S: TokenStorage + ?Sized>(
    storage: &S,
    client: &ApiClient,
    key: &str,
    token: Option<&str>,
) -> Result<(), AuthError> {
    match token {
        Some(token) => {
            storage.set(key, token)?;
            client.set_bearer(token);
        }
        None => {
            storage.remove(key)?;
            client.clear_bearer();
        }
    }
    Ok(())
}

/// Read the stored token, treating an empty slot value as absent.
///
/// # Errors
///
/// Propagates the storage error.
pub fn stored_token<S: TokenStorage + ?Sized>(storage: &S, key: &str) -> Result<Option<String>, AuthError> {
    Ok(storage.get(key)?.filter(|token| !token.is_empty()))
}
