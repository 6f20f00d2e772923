//! Sign-up page: creates an account and signs it in.

#[cfg(test)]
#[path = "sign_up_test.rs"]
mod sign_up_test;

use leptos::prelude::*;
use leptos_router::components::A;

use super::sign_in::{EMAIL_REQUIRED, looks_like_email};
use crate::auth::context::use_auth;
use crate::auth::holder::SessionHolder;
use crate::auth::storage::TokenStorage;
use crate::components::guards::GuestGuard;
use crate::config::AuthConfig;
use crate::net::api::AuthApi;
use crate::net::types::SignUpRequest;

pub(crate) const MIN_PASSWORD_LEN: usize = 8;
pub(crate) const NAME_REQUIRED: &str = "Informe nome e sobrenome.";
pub(crate) const PASSWORD_TOO_SHORT: &str = "A senha deve ter pelo menos 8 caracteres.";
pub(crate) const PASSWORD_MISMATCH: &str = "As senhas não conferem.";
pub(crate) const EMAIL_TAKEN: &str = "Este e-mail já está cadastrado.";

/// Raw form fields as typed.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub phone: String,
    pub business_id: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// Check password rules shared by sign-up and reset-password.
pub(crate) fn validate_new_password(password: &str, confirmation: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PASSWORD_TOO_SHORT);
    }
    if password != confirmation {
        return Err(PASSWORD_MISMATCH);
    }
    Ok(())
}

pub(crate) fn validate_sign_up_input(form: &SignUpForm) -> Result<SignUpRequest, &'static str> {
    let first_name = form.first_name.trim();
    let last_name = form.last_name.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err(NAME_REQUIRED);
    }
    let email = form.email.trim();
    if !looks_like_email(email) {
        return Err(EMAIL_REQUIRED);
    }
    validate_new_password(&form.password, &form.password_confirmation)?;
    Ok(SignUpRequest {
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        email: email.to_owned(),
        password: form.password.clone(),
        password_confirmation: form.password_confirmation.clone(),
        phone: optional(&form.phone),
        business_id: optional(&form.business_id),
    })
}

/// Create the account unless the address is already registered.
///
/// An unavailable availability check does not block the attempt.
pub(crate) async fn register<A: AuthApi, S: TokenStorage>(
    session: &SessionHolder<A, S>,
    request: &SignUpRequest,
) -> Result<(), String> {
    match session.check_email(&request.email).await {
        Ok(true) => return Err(EMAIL_TAKEN.to_owned()),
        Ok(false) => {}
        Err(e) => {
            leptos::logging::debug_warn!("email availability check failed: {e}");
        }
    }
    session.sign_up(request).await.map_err(|e| e.to_string())
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    view! {
        <GuestGuard>
            <SignUpFormView/>
        </GuestGuard>
    }
}

#[component]
fn SignUpFormView() -> impl IntoView {
    let config = use_context::<AuthConfig>().unwrap_or_default();
    let auth = use_auth();
    let form = RwSignal::new(SignUpForm::default());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_sign_up_input(&form.get()) {
            Ok(request) => request,
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
                if let Err(message) = register(&session, &request).await {
                    error.set(message);
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (auth, request);
    };

    let field = move |placeholder: &'static str,
                      kind: &'static str,
                      get: fn(&SignUpForm) -> String,
                      set: fn(&mut SignUpForm, String)| {
        view! {
            <input
                class="auth-input"
                type=kind
                placeholder=placeholder
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Criar conta"</h1>
                <form class="auth-form" on:submit=on_submit>
                    {field("Nome", "text", |f| f.first_name.clone(), |f, v| f.first_name = v)}
                    {field("Sobrenome", "text", |f| f.last_name.clone(), |f, v| f.last_name = v)}
                    {field("E-mail", "email", |f| f.email.clone(), |f, v| f.email = v)}
                    {field("Telefone (opcional)", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
                    {field("Senha", "password", |f| f.password.clone(), |f, v| f.password = v)}
                    {field(
                        "Confirmar senha",
                        "password",
                        |f| f.password_confirmation.clone(),
                        |f, v| f.password_confirmation = v,
                    )}
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Cadastrar"
                    </button>
                </form>
                <Show when=move || !error.get().is_empty()>
                    <p class="auth-message auth-message--error">{move || error.get()}</p>
                </Show>
                <div class="auth-links">
                    <A href=config.paths.sign_in.clone()>"Já tenho conta"</A>
                </div>
            </div>
        </div>
    }
}
