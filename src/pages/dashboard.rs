//! Dashboard landing page behind the auth guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Listing, sales and team screens mount under this route in the full admin;
//! here it shows who is signed in and offers sign-out.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::auth::context::use_auth;
use crate::state::user::UserRecord;

pub(crate) fn greeting(user: Option<&UserRecord>) -> String {
    match user.and_then(UserRecord::display_name) {
        Some(name) => format!("Olá, {name}"),
        None => "Olá".to_owned(),
    }
}

pub(crate) fn role_label(user: Option<&UserRecord>) -> String {
    let roles = user.map(UserRecord::roles).unwrap_or_default();
    if roles.is_empty() { "—".to_owned() } else { roles.join(", ") }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let signing_out = RwSignal::new(false);

    let on_sign_out = move |_| {
        if signing_out.get() {
            return;
        }
        signing_out.set(true);
        #[cfg(feature = "hydrate")]
        {
            let session = auth.session();
            leptos::task::spawn_local(async move {
                session.sign_out().await;
                signing_out.set(false);
            });
        }
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>{move || auth.user.with(|user| greeting(user.as_ref()))}</h1>
                <span class="dashboard-header__role">{move || auth.user.with(|user| role_label(user.as_ref()))}</span>
                <button class="auth-button" on:click=on_sign_out disabled=move || signing_out.get()>
                    "Sair"
                </button>
            </header>
        </div>
    }
}
