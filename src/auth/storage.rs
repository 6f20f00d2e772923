//! Key/value slot holding the bearer token between page loads.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build uses `window.sessionStorage`, so the session ends with
//! the tab. `MemoryStorage` backs server rendering and tests.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::AuthError;

/// String storage addressed by key. Failures propagate to the caller.
pub trait TokenStorage {
    /// Read the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` or `AuthError::Unavailable` when the
    /// backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, AuthError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` when the write is rejected (quota, privacy mode).
    fn set(&self, key: &str, value: &str) -> Result<(), AuthError>;

    /// Delete `key`; deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` when the backing store rejects the removal.
    fn remove(&self, key: &str) -> Result<(), AuthError>;
}

/// `window.sessionStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSessionStorage;

#[cfg(feature = "hydrate")]
fn session_storage() -> Result<web_sys::Storage, AuthError> {
    web_sys::window()
        .ok_or(AuthError::Unavailable)?
        .session_storage()
        .map_err(|e| AuthError::Storage(format!("{e:?}")))?
        .ok_or(AuthError::Unavailable)
}

impl TokenStorage for BrowserSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            session_storage()?
                .get_item(key)
                .map_err(|e| AuthError::Storage(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(AuthError::Unavailable)
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            session_storage()?
                .set_item(key, value)
                .map_err(|e| AuthError::Storage(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(AuthError::Unavailable)
        }
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            session_storage()?
                .remove_item(key)
                .map_err(|e| AuthError::Storage(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(AuthError::Unavailable)
        }
    }
}

/// In-process storage; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
