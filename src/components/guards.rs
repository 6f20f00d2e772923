//! Route guard components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Thin reactive wrappers over `auth::guard`: each mount owns a controller,
//! re-evaluates whenever the auth state or pathname changes, and performs the
//! navigation the controller asks for. Children render only after the
//! controller says so; until then the splash placeholder is shown.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate, use_query_map};

use crate::auth::context::use_auth;
use crate::auth::guard::{GuardController, GuardPolicy, GuardView, GuestController};
use crate::components::splash::SplashScreen;
use crate::config::AuthConfig;
use crate::util::auth::{RETURN_TO_PARAM, location_path};

fn replace_navigation() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Requires a signed-in user; otherwise redirects to sign-in with `returnTo`.
#[component]
pub fn AuthGuard(children: ChildrenFn) -> impl IntoView {
    guarded(GuardPolicy::basic(), children)
}

/// Requires a signed-in user holding one of `roles` (empty = any role), and
/// a verified email when `require_verified_email` is set. Refreshes tokens
/// that are about to expire.
#[component]
pub fn RoleBasedGuard(
    #[prop(optional)] roles: Vec<String>,
    #[prop(optional)] require_verified_email: bool,
    children: ChildrenFn,
) -> impl IntoView {
    guarded(GuardPolicy::extended(roles).with_verified_email(require_verified_email), children)
}

fn guarded(policy: GuardPolicy, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let config = use_context::<AuthConfig>().unwrap_or_default();
    let policy = match policy.refresh_lookahead_secs {
        Some(_) => policy.with_refresh_lookahead(config.refresh_lookahead_secs),
        None => policy,
    };
    let controller = StoredValue::new_local(Rc::new(GuardController::new(config.paths, policy)));
    let location = use_location();
    let navigate = use_navigate();
    let view_state = RwSignal::new(GuardView::Splash);

    Effect::new(move || {
        let pathname = location_path(&location.pathname.get(), &location.search.get());
        auth.state.track();
        let controller = controller.with_value(Rc::clone);
        let session = auth.session();
        let navigate = navigate.clone();
        let go = move |target: &str| navigate(target, replace_navigation());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let next = controller
                .evaluate(&session, &pathname, crate::util::time::now_secs(), &go)
                .await;
            view_state.set(next);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (controller, session, go, pathname, view_state);
    });

    view! {
        <Show
            when=move || view_state.get() == GuardView::Children
            fallback=|| view! { <SplashScreen/> }
        >
            {children()}
        </Show>
    }
}

/// Guest-only pages (sign-in, sign-up): signed-in users are sent to
/// `returnTo` or the dashboard.
#[component]
pub fn GuestGuard(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let config = use_context::<AuthConfig>().unwrap_or_default();
    let controller = StoredValue::new_local(GuestController::new(&config.paths.dashboard));
    let query = use_query_map();
    let navigate = use_navigate();
    let view_state = RwSignal::new(GuardView::Splash);

    Effect::new(move || {
        let state = auth.state.get();
        let return_to = query.with(|q| q.get(RETURN_TO_PARAM));
        let go = |target: &str| navigate(target, replace_navigation());
        let next = controller.with_value(|c| c.evaluate(&state, return_to.as_deref(), &go));
        view_state.set(next);
    });

    view! {
        <Show
            when=move || view_state.get() == GuardView::Children
            fallback=|| view! { <SplashScreen/> }
        >
            {children()}
        </Show>
    }
}
