//! Auth context published to the component tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthProvider` owns the session holder for its subtree, mirrors holder
//! state into an `RwSignal`, and runs the initial session check once on
//! mount. Consumers read derived `Memo`s, so they re-render only when the
//! user or loading flag actually changes.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use leptos::prelude::*;

use super::holder::SessionHolder;
use super::storage::BrowserSessionStorage;
use crate::config::AuthConfig;
use crate::net::api::HttpAuthApi;
use crate::net::client::ApiClient;
use crate::state::auth::AuthState;
use crate::state::user::UserRecord;

/// The holder wired to the real backend and `sessionStorage`.
pub type AppSession = SessionHolder<HttpAuthApi, BrowserSessionStorage>;

/// Read-only view over [`AuthState`].
#[derive(Clone, Debug, PartialEq)]
pub struct AuthSnapshot {
    pub user: Option<UserRecord>,
    pub authenticated: bool,
    pub unauthenticated: bool,
    pub loading: bool,
}

impl From<&AuthState> for AuthSnapshot {
    fn from(state: &AuthState) -> Self {
        Self {
            user: state.user.clone(),
            authenticated: state.is_authenticated(),
            unauthenticated: state.is_unauthenticated(),
            loading: state.loading,
        }
    }
}

#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
    pub user: Memo<Option<UserRecord>>,
    pub authenticated: Memo<bool>,
    pub unauthenticated: Memo<bool>,
    pub loading: Memo<bool>,
    pub check_user_session: Callback<()>,
    pub update_user: Callback<UserRecord>,
    session: StoredValue<AppSession, LocalStorage>,
}

impl AuthContext {
    fn new(state: RwSignal<AuthState>, session: StoredValue<AppSession, LocalStorage>) -> Self {
        let user = Memo::new(move |_| state.with(|s| s.user.clone()));
        let authenticated = Memo::new(move |_| state.with(AuthState::is_authenticated));
        let unauthenticated = Memo::new(move |_| state.with(AuthState::is_unauthenticated));
        let loading = Memo::new(move |_| state.with(|s| s.loading));

        let check_user_session = Callback::new(move |()| {
            let holder = session.with_value(Clone::clone);
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                holder.check_user_session().await;
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = holder;
        });
        let update_user = Callback::new(move |patch: UserRecord| {
            session.with_value(|holder| holder.update_user(patch));
        });

        Self {
            state,
            user,
            authenticated,
            unauthenticated,
            loading,
            check_user_session,
            update_user,
            session,
        }
    }

    /// Handle for user-initiated actions (sign-in, sign-out, refresh, ...).
    pub fn session(&self) -> AppSession {
        self.session.with_value(Clone::clone)
    }

    /// Untracked snapshot of the current state.
    pub fn snapshot(&self) -> AuthSnapshot {
        self.state.with_untracked(|s| AuthSnapshot::from(s))
    }
}

/// Read the auth context provided by [`AuthProvider`].
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Owns the session for its children and publishes [`AuthContext`].
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let config = use_context::<AuthConfig>().unwrap_or_default();
    let client = ApiClient::from_config(&config);
    let holder = SessionHolder::new(HttpAuthApi::new(client.clone()), BrowserSessionStorage, client, &config);

    let state = RwSignal::new(holder.state());
    holder.subscribe(move |next| state.set(next.clone()));
    provide_context(AuthContext::new(state, StoredValue::new_local(holder.clone())));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        holder.check_user_session().await;
    });

    children()
}
