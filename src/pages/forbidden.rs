//! 403 page for signed-in users outside a route's role allow-list.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::config::AuthConfig;

#[component]
pub fn ForbiddenPage() -> impl IntoView {
    let dashboard = use_context::<AuthConfig>().unwrap_or_default().paths.dashboard;
    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Acesso negado"</h1>
                <p class="auth-message">"Seu perfil não tem permissão para acessar esta página."</p>
                <div class="auth-links">
                    <A href=dashboard>"Voltar ao painel"</A>
                </div>
            </div>
        </div>
    }
}
