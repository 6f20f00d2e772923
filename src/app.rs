//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment, WildcardSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::auth::context::AuthProvider;
use crate::components::guards::{AuthGuard, RoleBasedGuard};
use crate::config::AuthConfig;
use crate::pages::{
    dashboard::DashboardPage,
    forbidden::ForbiddenPage,
    password::{ForgotPasswordPage, ResetPasswordPage},
    sign_in::SignInPage,
    sign_up::SignUpPage,
    verify_email::VerifyEmailPage,
};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides configuration and the auth context, then sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(AuthConfig::from_env());

    view! {
        <Stylesheet id="leptos" href="/pkg/imob-admin.css"/>
        <Title text="Imob Admin"/>

        <AuthProvider>
            <Router>
                <Routes fallback=|| "Página não encontrada.".into_view()>
                    <Route path=(StaticSegment("auth"), StaticSegment("sign-in")) view=SignInPage/>
                    <Route path=(StaticSegment("auth"), StaticSegment("sign-up")) view=SignUpPage/>
                    <Route path=(StaticSegment("auth"), StaticSegment("forgot-password")) view=ForgotPasswordPage/>
                    <Route path=(StaticSegment("auth"), StaticSegment("reset-password")) view=ResetPasswordPage/>
                    <Route
                        path=(StaticSegment("auth"), StaticSegment("verify-email"))
                        view=|| view! { <AuthGuard><VerifyEmailPage/></AuthGuard> }
                    />
                    <Route path=StaticSegment("403") view=ForbiddenPage/>
                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! { <RoleBasedGuard><DashboardPage/></RoleBasedGuard> }
                    />
                    <Route
                        path=(StaticSegment("dashboard"), WildcardSegment("rest"))
                        view=|| view! { <RoleBasedGuard><DashboardPage/></RoleBasedGuard> }
                    />
                    <Route path=StaticSegment("") view=|| view! { <Redirect path="/dashboard"/> }/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}
