//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written only by the session holder; read by route guards and user-aware
//! components through the auth context.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::user::UserRecord;

/// Authentication state tracking the current user and loading status.
///
/// `loading` is `true` only until the first session check settles.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<UserRecord>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

/// Coarse session status derived from [`AuthState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    Loading,
    Authenticated,
    Unauthenticated,
}

impl AuthState {
    pub fn authenticated(user: UserRecord) -> Self {
        Self { user: Some(user), loading: false }
    }

    pub fn unauthenticated() -> Self {
        Self { user: None, loading: false }
    }

    pub fn status(&self) -> AuthStatus {
        match (self.loading, &self.user) {
            (true, _) => AuthStatus::Loading,
            (false, Some(_)) => AuthStatus::Authenticated,
            (false, None) => AuthStatus::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == AuthStatus::Authenticated
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.status() == AuthStatus::Unauthenticated
    }
}
