//! Email verification page.
//!
//! With `?token=...` (the emailed link) it confirms the address once on
//! mount. Without a token it is the landing spot for guards that require a
//! verified email.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;

use crate::auth::context::use_auth;
use crate::config::AuthConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
enum VerifyStatus {
    AwaitingLink,
    Verifying,
    Verified,
    Failed(String),
}

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let config = use_context::<AuthConfig>().unwrap_or_default();
    let auth = use_auth();
    let query = use_query_map();
    let token = query.with_untracked(|q| q.get("token")).filter(|t| !t.trim().is_empty());
    let status = RwSignal::new(if token.is_some() { VerifyStatus::Verifying } else { VerifyStatus::AwaitingLink });

    #[cfg(feature = "hydrate")]
    if let Some(token) = token {
        let session = auth.session();
        leptos::task::spawn_local(async move {
            match session.verify_email(&token).await {
                Ok(()) => status.set(VerifyStatus::Verified),
                Err(e) => status.set(VerifyStatus::Failed(e.to_string())),
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (auth, token);

    let message = move || match status.get() {
        VerifyStatus::AwaitingLink => {
            "Enviamos um link de confirmação para o seu e-mail. Abra-o para liberar o acesso.".to_owned()
        }
        VerifyStatus::Verifying => "Confirmando seu e-mail...".to_owned(),
        VerifyStatus::Verified => "E-mail confirmado!".to_owned(),
        VerifyStatus::Failed(reason) => format!("Não foi possível confirmar: {reason}"),
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Confirmação de e-mail"</h1>
                <p class="auth-message">{message}</p>
                <div class="auth-links">
                    <A href=config.paths.dashboard.clone()>"Ir para o painel"</A>
                </div>
            </div>
        </div>
    }
}
