//! Full-page placeholder shown while a guard is deciding.

use leptos::prelude::*;

#[component]
pub fn SplashScreen() -> impl IntoView {
    view! {
        <div class="splash-screen" role="status" aria-live="polite">
            <div class="splash-screen__spinner"></div>
            <span class="splash-screen__label">"Carregando..."</span>
        </div>
    }
}
