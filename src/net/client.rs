//! Shared HTTP client carrying the default `Authorization` header.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every REST helper builds its request through one `ApiClient`. Clones share
//! the header slot, so installing or clearing the bearer token affects every
//! request issued afterwards, wherever the clone lives.
//!
//! TRADE-OFFS
//! ==========
//! The slot is mutable shared state: a request issued between clearing and
//! re-installing the token goes out unauthenticated.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::AuthConfig;

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: Rc<str>,
    authorization: Rc<RefCell<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: Rc::from(base_url.trim_end_matches('/')),
            authorization: Rc::new(RefCell::new(None)),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.api_url)
    }

    /// Absolute URL for an API path such as `/auth/me`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Install `Authorization: Bearer <token>` for all subsequent requests.
    pub fn set_bearer(&self, token: &str) {
        *self.authorization.borrow_mut() = Some(format!("Bearer {token}"));
    }

    /// Drop the default `Authorization` header.
    pub fn clear_bearer(&self) {
        *self.authorization.borrow_mut() = None;
    }

    /// Current default `Authorization` header value.
    pub fn authorization(&self) -> Option<String> {
        self.authorization.borrow().clone()
    }

    #[cfg(feature = "hydrate")]
    fn with_auth(&self, builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        match self.authorization() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    #[cfg(feature = "hydrate")]
    pub(crate) fn get(&self, path: &str) -> gloo_net::http::RequestBuilder {
        self.with_auth(gloo_net::http::Request::get(&self.url(path)))
    }

    #[cfg(feature = "hydrate")]
    pub(crate) fn post(&self, path: &str) -> gloo_net::http::RequestBuilder {
        self.with_auth(gloo_net::http::Request::post(&self.url(path)))
    }
}
