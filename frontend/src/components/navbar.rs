use leptos::*;

use crate::session::use_session;

#[component]
pub fn Navbar() -> impl IntoView {
    let controller = use_session();
    let is_authenticated = create_memo({
        let controller = controller.clone();
        move |_| controller.is_authenticated()
    });
    let display_name = create_memo({
        let controller = controller.clone();
        move |_| {
            controller
                .current_user()
                .map(|user| user.display_name())
                .unwrap_or_default()
        }
    });
    let on_logout = {
        let controller = controller.clone();
        move |_| {
            controller.logout();
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/login");
            }
        }
    };
    view! {
        <header class="bg-white shadow-sm border-b border-slate-200">
            <div class="max-w-5xl mx-auto px-4 flex justify-between items-center h-14">
                <a href="/" class="text-lg font-semibold text-slate-800">
                    "Gatehouse"
                </a>
                <Show
                    when=move || is_authenticated.get()
                    fallback=|| view! {
                        <a href="/login" class="text-sm font-medium text-indigo-600 hover:text-indigo-800">
                            "Sign in"
                        </a>
                    }
                >
                    <nav class="flex items-center space-x-4 text-sm">
                        <a href="/home" class="text-slate-600 hover:text-slate-900">"Home"</a>
                        <a href="/profile" class="text-slate-600 hover:text-slate-900">"Profile"</a>
                        <span class="text-slate-400">{move || display_name.get()}</span>
                        <button
                            class="text-red-600 hover:text-red-800 font-medium"
                            on:click=on_logout.clone()
                        >
                            "Logout"
                        </button>
                    </nav>
                </Show>
            </div>
        </header>
    }
}
