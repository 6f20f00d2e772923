//! Session state holder: the single writer of [`AuthState`].
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthProvider` owns one holder per mount and mirrors every state change
//! into a reactive signal. Pages call the user-initiated actions (sign-in,
//! sign-up, sign-out, password flows); guards call `refresh_session`.
//!
//! ERROR HANDLING
//! ==============
//! Session checks never fail: missing, malformed or expired tokens and any
//! `/auth/me` failure collapse into "unauthenticated" and the stored token is
//! cleared. Only form actions return `AuthError` to the caller. Nothing is
//! retried.
//!
//! CONCURRENCY
//! ===========
//! Single-threaded. `check_user_session` holds a boolean latch while a check
//! is in flight; overlapping callers poll the latch at a fixed interval and
//! return once it clears, without requesting `/auth/me` themselves. Responses
//! are not tied to the route that issued them, so a slow check can settle
//! after a navigation.

#[cfg(test)]
#[path = "holder_test.rs"]
mod holder_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::session::{set_session, stored_token};
use super::storage::TokenStorage;
use super::token;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::net::api::AuthApi;
use crate::net::client::ApiClient;
use crate::net::types::{ResetPasswordRequest, SignInRequest, SignUpRequest};
use crate::state::auth::AuthState;
use crate::state::user::UserRecord;
use crate::util::time::sleep_ms;

type Listener = Rc<dyn Fn(&AuthState)>;

struct Inner<A, S> {
    api: A,
    storage: S,
    client: ApiClient,
    token_key: String,
    poll_ms: u32,
    state: RefCell<AuthState>,
    checking: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
}

/// Cheap handle; clones share the same state and latch.
pub struct SessionHolder<A, S> {
    inner: Rc<Inner<A, S>>,
}

impl<A, S> Clone for SessionHolder<A, S> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

/// Clears the in-flight latch even if the check future is dropped.
struct CheckLatch<'a>(&'a Cell<bool>);

impl Drop for CheckLatch<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<A: AuthApi, S: TokenStorage> SessionHolder<A, S> {
    pub fn new(api: A, storage: S, client: ApiClient, config: &AuthConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                api,
                storage,
                client,
                token_key: config.token_key.clone(),
                poll_ms: config.session_poll_ms,
                state: RefCell::new(AuthState::default()),
                checking: Cell::new(false),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    /// Whether a session check is currently in flight.
    pub fn is_checking(&self) -> bool {
        self.inner.checking.get()
    }

    /// Call `listener` after every state change.
    pub fn subscribe(&self, listener: impl Fn(&AuthState) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// The stored bearer token, if any. Storage errors read as "no token".
    pub fn stored_token(&self) -> Option<String> {
        match stored_token(&self.inner.storage, &self.inner.token_key) {
            Ok(token) => token,
            Err(e) => {
                leptos::logging::debug_warn!("reading session token failed: {e}");
                None
            }
        }
    }

    /// Resolve the session from the stored token and `/auth/me`.
    pub async fn check_user_session(&self) {
        if self.inner.checking.get() {
            while self.inner.checking.get() {
                sleep_ms(self.inner.poll_ms).await;
            }
            return;
        }
        self.inner.checking.set(true);
        let _latch = CheckLatch(&self.inner.checking);
        let next = self.resolve_session().await;
        self.set_state(next);
    }

    async fn resolve_session(&self) -> AuthState {
        let Some(access_token) = self.stored_token().filter(|t| token::is_valid(t)) else {
            self.clear_session();
            return AuthState::unauthenticated();
        };
        if let Err(e) = self.install_token(&access_token) {
            leptos::logging::debug_warn!("installing session token failed: {e}");
            self.clear_session();
            return AuthState::unauthenticated();
        }
        match self.inner.api.me().await {
            Ok(mut user) => {
                let claims = token::decode(&access_token);
                user.decorate(&access_token, claims.as_ref());
                AuthState::authenticated(user)
            }
            Err(e) => {
                leptos::logging::debug_warn!("session check failed: {e}");
                self.clear_session();
                AuthState::unauthenticated()
            }
        }
    }

    /// Shallow-merge `patch` into the signed-in user. No-op when signed out.
    pub fn update_user(&self, patch: UserRecord) {
        let mut state = self.state();
        let Some(user) = state.user.as_mut() else {
            return;
        };
        if state.loading {
            return;
        }
        user.merge(patch);
        self.set_state(state);
    }

    /// Exchange credentials for a token and load the user.
    ///
    /// # Errors
    ///
    /// Returns the backend's error (its message is shown verbatim on the
    /// form), a storage error, or `NotAuthenticated` when the issued token
    /// does not yield a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let request = SignInRequest { email: email.to_owned(), password: password.to_owned() };
        let payload = self.inner.api.sign_in(&request).await?;
        self.start_session(&payload.token).await
    }

    /// Register an account and sign it in.
    ///
    /// # Errors
    ///
    /// Same as [`SessionHolder::sign_in`].
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<(), AuthError> {
        let payload = self.inner.api.sign_up(request).await?;
        self.start_session(&payload.token).await
    }

    async fn start_session(&self, access_token: &str) -> Result<(), AuthError> {
        self.install_token(access_token)?;
        self.check_user_session().await;
        if self.state().is_authenticated() {
            Ok(())
        } else {
            Err(AuthError::NotAuthenticated)
        }
    }

    /// Best-effort backend logout, then clear the local session regardless.
    pub async fn sign_out(&self) {
        if let Err(e) = self.inner.api.logout().await {
            leptos::logging::debug_warn!("logout request failed: {e}");
        }
        self.clear_session();
        self.set_state(AuthState::unauthenticated());
    }

    /// Swap the current token for a fresh one.
    ///
    /// Returns `false` (and ends the session) when the backend refuses or the
    /// new token is unusable; never raises.
    pub async fn refresh_session(&self) -> bool {
        let refreshed = match self.inner.api.refresh().await {
            Ok(access_token) if token::is_valid(&access_token) => {
                self.install_token(&access_token).map(|()| access_token)
            }
            Ok(_) => Err(AuthError::Decode),
            Err(e) => Err(e),
        };
        match refreshed {
            Ok(access_token) => {
                let mut state = self.state();
                if let Some(user) = state.user.as_mut() {
                    user.stamp_token(&access_token, token::decode(&access_token).as_ref());
                }
                self.set_state(state);
                true
            }
            Err(e) => {
                leptos::logging::debug_warn!("token refresh failed: {e}");
                self.clear_session();
                self.set_state(AuthState::unauthenticated());
                false
            }
        }
    }

    /// # Errors
    ///
    /// Returns the backend error for display on the form.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        self.inner.api.forgot_password(email).await
    }

    /// # Errors
    ///
    /// Returns the backend error for display on the form.
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), AuthError> {
        self.inner.api.reset_password(request).await
    }

    /// Confirm an email-verification token; marks the signed-in user verified.
    ///
    /// # Errors
    ///
    /// Returns the backend error for display on the page.
    pub async fn verify_email(&self, verification_token: &str) -> Result<(), AuthError> {
        self.inner.api.verify_email(verification_token).await?;
        self.update_user(UserRecord::new().with("emailVerified", true));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns the backend error for display on the form.
    pub async fn check_email(&self, email: &str) -> Result<bool, AuthError> {
        self.inner.api.check_email(email).await
    }

    fn install_token(&self, access_token: &str) -> Result<(), AuthError> {
        set_session(&self.inner.storage, &self.inner.client, &self.inner.token_key, Some(access_token))
    }

    fn clear_session(&self) {
        if let Err(e) = set_session(&self.inner.storage, &self.inner.client, &self.inner.token_key, None) {
            leptos::logging::debug_warn!("clearing session token failed: {e}");
            self.inner.client.clear_bearer();
        }
    }

    fn set_state(&self, next: AuthState) {
        *self.inner.state.borrow_mut() = next.clone();
        let listeners = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(&next);
        }
    }
}
