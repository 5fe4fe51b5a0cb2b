use leptos::*;

use crate::session::use_session;

/// One-shot banner shown after an expired session tore down the login.
/// Dismissing it consumes the notice; it never reappears for the same
/// event.
#[component]
pub fn SessionExpiredBanner() -> impl IntoView {
    let controller = use_session();
    let notice = controller.pending_notice();
    let dismiss = {
        let controller = controller.clone();
        move |_| {
            controller.take_notice();
        }
    };
    view! {
        <Show when=move || notice.get().is_some()>
            <div class="bg-amber-100 border-b border-amber-300 text-amber-900 px-4 py-2 flex justify-between items-center text-sm">
                <span>"Your session has expired. Please log in again."</span>
                <button class="font-medium underline" on:click=dismiss.clone()>
                    "Dismiss"
                </button>
            </div>
        </Show>
    }
}

#[component]
pub fn Card(children: Children) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl shadow-md p-8 max-w-md w-full text-center">
            {children()}
        </div>
    }
}

#[component]
pub fn CenteredPage(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-slate-100 px-4">
            {children()}
        </div>
    }
}
