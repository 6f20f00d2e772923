//! Sign-in page: email + password against `/auth/sign-in`.
//!
//! Wrapped in `GuestGuard`, so a successful sign-in (which flips the auth
//! state to authenticated) sends the user on to `returnTo`.

#[cfg(test)]
#[path = "sign_in_test.rs"]
mod sign_in_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::auth::context::use_auth;
use crate::components::guards::GuestGuard;
use crate::config::AuthConfig;

pub(crate) const EMAIL_REQUIRED: &str = "Informe um e-mail válido.";
pub(crate) const PASSWORD_REQUIRED: &str = "Informe a senha.";

/// Minimal shape check; the backend does the real validation.
pub(crate) fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

pub(crate) fn validate_sign_in_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if !looks_like_email(email) {
        return Err(EMAIL_REQUIRED);
    }
    if password.is_empty() {
        return Err(PASSWORD_REQUIRED);
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn SignInPage() -> impl IntoView {
    view! {
        <GuestGuard>
            <SignInForm/>
        </GuestGuard>
    }
}

#[component]
fn SignInForm() -> impl IntoView {
    let config = use_context::<AuthConfig>().unwrap_or_default();
    let auth = use_auth();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_sign_in_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                error.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let session = auth.session();
            leptos::task::spawn_local(async move {
                if let Err(e) = session.sign_in(&email_value, &password_value).await {
                    error.set(e.to_string());
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (auth, email_value, password_value);
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Entrar"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="voce@imobiliaria.com.br"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Senha"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Entrando..." } else { "Entrar" }}
                    </button>
                </form>
                <Show when=move || !error.get().is_empty()>
                    <p class="auth-message auth-message--error">{move || error.get()}</p>
                </Show>
                <div class="auth-links">
                    <A href=config.paths.forgot_password.clone()>"Esqueci minha senha"</A>
                    <A href=config.paths.sign_up.clone()>"Criar conta"</A>
                </div>
            </div>
        </div>
    }
}
