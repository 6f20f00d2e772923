//! Forgot-password and reset-password pages.

#[cfg(test)]
#[path = "password_test.rs"]
mod password_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;

use super::sign_in::{EMAIL_REQUIRED, looks_like_email};
use super::sign_up::validate_new_password;
use crate::auth::context::use_auth;
use crate::components::guards::GuestGuard;
use crate::config::AuthConfig;
use crate::net::types::ResetPasswordRequest;

pub(crate) const RESET_LINK_SENT: &str = "Se o e-mail estiver cadastrado, enviaremos um link de redefinição.";
pub(crate) const RESET_TOKEN_MISSING: &str = "Link de redefinição inválido.";

pub(crate) fn validate_forgot_password_input(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if looks_like_email(email) { Ok(email.to_owned()) } else { Err(EMAIL_REQUIRED) }
}

pub(crate) fn validate_reset_password_input(
    token: Option<&str>,
    password: &str,
    confirmation: &str,
) -> Result<ResetPasswordRequest, &'static str> {
    let token = token.map(str::trim).filter(|t| !t.is_empty()).ok_or(RESET_TOKEN_MISSING)?;
    validate_new_password(password, confirmation)?;
    Ok(ResetPasswordRequest {
        token: token.to_owned(),
        password: password.to_owned(),
        password_confirmation: confirmation.to_owned(),
    })
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let config = use_context::<AuthConfig>().unwrap_or_default();
    let auth = use_auth();
    let email = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = match validate_forgot_password_input(&email.get()) {
            Ok(value) => value,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let session = auth.session();
            leptos::task::spawn_local(async move {
                match session.forgot_password(&email_value).await {
                    Ok(()) => info.set(RESET_LINK_SENT.to_owned()),
                    Err(e) => info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (auth, email_value);
    };

    view! {
        <GuestGuard>
            <div class="auth-page">
                <div class="auth-card">
                    <h1>"Recuperar senha"</h1>
                    <form class="auth-form" on:submit=on_submit>
                        <input
                            class="auth-input"
                            type="email"
                            placeholder="voce@imobiliaria.com.br"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <button class="auth-button" type="submit" disabled=move || busy.get()>
                            "Enviar link"
                        </button>
                    </form>
                    <Show when=move || !info.get().is_empty()>
                        <p class="auth-message">{move || info.get()}</p>
                    </Show>
                    <div class="auth-links">
                        <A href=config.paths.sign_in.clone()>"Voltar para o login"</A>
                    </div>
                </div>
            </div>
        </GuestGuard>
    }
}

/// Reached from the emailed link: `/auth/reset-password?token=...`.
#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let config = use_context::<AuthConfig>().unwrap_or_default();
    let auth = use_auth();
    let query = use_query_map();
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let done = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() || done.get() {
            return;
        }
        let token = query.with(|q| q.get("token"));
        let request = match validate_reset_password_input(token.as_deref(), &password.get(), &confirmation.get()) {
            Ok(request) => request,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let session = auth.session();
            leptos::task::spawn_local(async move {
                match session.reset_password(&request).await {
                    Ok(()) => {
                        done.set(true);
                        info.set("Senha redefinida. Faça login com a nova senha.".to_owned());
                    }
                    Err(e) => info.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (auth, request);
    };

    view! {
        <GuestGuard>
            <div class="auth-page">
                <div class="auth-card">
                    <h1>"Nova senha"</h1>
                    <form class="auth-form" on:submit=on_submit>
                        <input
                            class="auth-input"
                            type="password"
                            placeholder="Nova senha"
                            autocomplete="new-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <input
                            class="auth-input"
                            type="password"
                            placeholder="Confirmar nova senha"
                            autocomplete="new-password"
                            prop:value=move || confirmation.get()
                            on:input=move |ev| confirmation.set(event_target_value(&ev))
                        />
                        <button class="auth-button" type="submit" disabled=move || busy.get() || done.get()>
                            "Redefinir"
                        </button>
                    </form>
                    <Show when=move || !info.get().is_empty()>
                        <p class="auth-message">{move || info.get()}</p>
                    </Show>
                    <div class="auth-links">
                        <A href=config.paths.sign_in.clone()>"Ir para o login"</A>
                    </div>
                </div>
            </div>
        </GuestGuard>
    }
}
