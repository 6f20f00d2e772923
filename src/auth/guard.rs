//! Route-guard decisions, independent of the component layer.
//!
//! DESIGN
//! ======
//! Each guard mount owns a controller holding its one-shot latches: one
//! redirect and one refresh attempt per route visit. Seeing a new pathname
//! resets both, so every navigation gets a fresh chance. The components in
//! `components::guards` only feed the controller the current state and path
//! and perform the navigation it asks for.
//!
//! Evaluation order for [`GuardController`]:
//! 1. loading → splash
//! 2. token near expiry and not yet refreshed on this route → refresh once
//! 3. signed out → sign-in with `returnTo`
//! 4. role outside a non-empty allow-list → forbidden page
//! 5. unverified email when required → verify-email page
//! 6. children

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::cell::{Cell, RefCell};

use super::holder::SessionHolder;
use super::storage::TokenStorage;
use super::token::expires_within;
use crate::config::{AuthPaths, REFRESH_LOOKAHEAD_SECS};
use crate::net::api::AuthApi;
use crate::state::auth::AuthState;
use crate::util::auth::{post_login_target, sign_in_href};

/// What a guard renders in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardView {
    #[default]
    Splash,
    Children,
}

/// Next step chosen from one state snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Splash,
    Refresh,
    Redirect(String),
    Render,
}

/// Authorization requirements beyond "signed in".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuardPolicy {
    /// Allowed roles; empty admits every signed-in user.
    pub roles: Vec<String>,
    pub require_verified_email: bool,
    /// Refresh tokens expiring within this many seconds; `None` disables.
    pub refresh_lookahead_secs: Option<i64>,
}

impl GuardPolicy {
    /// Signed-in check only.
    pub fn basic() -> Self {
        Self::default()
    }

    /// Role allow-list plus proactive token refresh.
    pub fn extended(roles: Vec<String>) -> Self {
        Self { roles, require_verified_email: false, refresh_lookahead_secs: Some(REFRESH_LOOKAHEAD_SECS) }
    }

    #[must_use]
    pub fn with_verified_email(mut self, required: bool) -> Self {
        self.require_verified_email = required;
        self
    }

    #[must_use]
    pub fn with_refresh_lookahead(mut self, secs: i64) -> Self {
        self.refresh_lookahead_secs = Some(secs);
        self
    }
}

/// Gate for pages that require a session.
#[derive(Debug)]
pub struct GuardController {
    paths: AuthPaths,
    policy: GuardPolicy,
    pathname: RefCell<Option<String>>,
    redirected: Cell<bool>,
    refresh_attempted: Cell<bool>,
}

impl GuardController {
    pub fn new(paths: AuthPaths, policy: GuardPolicy) -> Self {
        Self {
            paths,
            policy,
            pathname: RefCell::new(None),
            redirected: Cell::new(false),
            refresh_attempted: Cell::new(false),
        }
    }

    /// Reset the one-shot latches when `pathname` differs from the last one seen.
    pub fn observe_path(&self, pathname: &str) {
        let mut last = self.pathname.borrow_mut();
        if last.as_deref() != Some(pathname) {
            *last = Some(pathname.to_owned());
            self.redirected.set(false);
            self.refresh_attempted.set(false);
        }
    }

    /// Pick the next step for `state` at `pathname`.
    ///
    /// `token` is the stored bearer token and `now` the wall clock in epoch
    /// seconds, both used only for the refresh lookahead.
    pub fn decide(&self, state: &AuthState, pathname: &str, token: Option<&str>, now: i64) -> GuardDecision {
        self.observe_path(pathname);
        if state.loading {
            return GuardDecision::Splash;
        }
        if let Some(window) = self.policy.refresh_lookahead_secs {
            let near_expiry = token.is_some_and(|t| expires_within(t, now, window));
            if near_expiry && !self.refresh_attempted.get() {
                self.refresh_attempted.set(true);
                return GuardDecision::Refresh;
            }
        }
        match self.redirect_target(state, pathname) {
            None => GuardDecision::Render,
            Some(_) if self.redirected.get() => GuardDecision::Splash,
            Some(target) => {
                self.redirected.set(true);
                GuardDecision::Redirect(target)
            }
        }
    }

    fn redirect_target(&self, state: &AuthState, pathname: &str) -> Option<String> {
        let Some(user) = state.user.as_ref().filter(|_| state.is_authenticated()) else {
            return Some(sign_in_href(&self.paths.sign_in, pathname));
        };
        if !user.has_any_role(&self.policy.roles) {
            return Some(self.paths.forbidden.clone());
        }
        if self.policy.require_verified_email && !user.email_verified() {
            return Some(self.paths.verify_email.clone());
        }
        None
    }

    /// Run the decision loop against a live session, performing the refresh
    /// and calling `navigate` for redirects.
    pub async fn evaluate<A: AuthApi, S: TokenStorage>(
        &self,
        session: &SessionHolder<A, S>,
        pathname: &str,
        now: i64,
        navigate: &dyn Fn(&str),
    ) -> GuardView {
        loop {
            let token = session.stored_token();
            match self.decide(&session.state(), pathname, token.as_deref(), now) {
                GuardDecision::Refresh => {
                    if !session.refresh_session().await {
                        leptos::logging::debug_warn!("refresh before {pathname} failed; treating session as expired");
                    }
                }
                GuardDecision::Splash => return GuardView::Splash,
                GuardDecision::Redirect(target) => {
                    navigate(&target);
                    return GuardView::Splash;
                }
                GuardDecision::Render => return GuardView::Children,
            }
        }
    }
}

/// Gate for guest-only pages (sign-in, sign-up).
#[derive(Debug)]
pub struct GuestController {
    default_path: String,
    redirected: Cell<bool>,
}

impl GuestController {
    pub fn new(default_path: &str) -> Self {
        Self { default_path: default_path.to_owned(), redirected: Cell::new(false) }
    }

    pub fn decide(&self, state: &AuthState, return_to: Option<&str>) -> GuardDecision {
        if state.loading {
            return GuardDecision::Splash;
        }
        if !state.is_authenticated() {
            return GuardDecision::Render;
        }
        if self.redirected.replace(true) {
            return GuardDecision::Splash;
        }
        GuardDecision::Redirect(post_login_target(return_to, &self.default_path))
    }

    pub fn evaluate(&self, state: &AuthState, return_to: Option<&str>, navigate: &dyn Fn(&str)) -> GuardView {
        match self.decide(state, return_to) {
            GuardDecision::Render => GuardView::Children,
            GuardDecision::Redirect(target) => {
                navigate(&target);
                GuardView::Splash
            }
            GuardDecision::Splash | GuardDecision::Refresh => GuardView::Splash,
        }
    }
}
