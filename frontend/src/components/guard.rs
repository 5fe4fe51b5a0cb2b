use leptos::*;

use crate::session::{decide, use_session, RouteAccess, RouteDecision};

fn redirect(target: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(target);
    }
}

/// Wraps a protected view. The decision is re-evaluated whenever the
/// session state changes, so an invalidation while the view is on screen
/// redirects immediately rather than waiting for the next navigation.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let controller = use_session();
    let decision =
        create_memo(move |_| decide(RouteAccess::Protected, controller.is_authenticated()));
    create_effect(move |_| {
        if let Some(target) = decision.get().redirect_target() {
            redirect(target);
        }
    });
    view! {
        <Show when=move || decision.get() == RouteDecision::Render>
            {children()}
        </Show>
    }
}

/// Wraps a public-only view such as the login page: a signed-in visitor is
/// sent to the home dashboard instead.
#[component]
pub fn RedirectIfAuthenticated(children: ChildrenFn) -> impl IntoView {
    let controller = use_session();
    let decision =
        create_memo(move |_| decide(RouteAccess::PublicOnly, controller.is_authenticated()));
    create_effect(move |_| {
        if let Some(target) = decision.get().redirect_target() {
            redirect(target);
        }
    });
    view! {
        <Show when=move || decision.get() == RouteDecision::Render>
            {children()}
        </Show>
    }
}
