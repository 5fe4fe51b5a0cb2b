use leptos::*;

use crate::session::use_session;

#[component]
pub fn WelcomePage() -> impl IntoView {
    let controller = use_session();
    let is_authenticated = create_memo(move |_| controller.is_authenticated());
    view! {
        <div class="min-h-screen bg-slate-100">
            <div class="max-w-3xl mx-auto py-20 px-4 text-center">
                <h1 class="text-4xl font-extrabold text-slate-800">
                    "Gatehouse"
                </h1>
                <p class="mt-4 text-lg text-slate-500">
                    "Sign in with Google and pick up where you left off."
                </p>
                <div class="mt-8">
                    <Show
                        when=move || is_authenticated.get()
                        fallback=|| view! {
                            <a href="/login" class="inline-block px-8 py-3 rounded-md text-white bg-indigo-600 hover:bg-indigo-700 font-medium">
                                "Get started"
                            </a>
                        }
                    >
                        <a href="/home" class="inline-block px-8 py-3 rounded-md text-white bg-indigo-600 hover:bg-indigo-700 font-medium">
                            "Go to your dashboard"
                        </a>
                    </Show>
                </div>
            </div>
        </div>
    }
}
