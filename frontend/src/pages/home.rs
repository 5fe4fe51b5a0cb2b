use leptos::*;

use crate::session::use_session;

#[component]
pub fn HomePage() -> impl IntoView {
    let controller = use_session();
    let greeting = create_memo(move |_| {
        controller
            .current_user()
            .map(|user| format!("Welcome back, {}!", user.display_name()))
            .unwrap_or_default()
    });
    view! {
        <div class="max-w-5xl mx-auto py-10 px-4">
            <h1 class="text-3xl font-bold text-slate-800">
                {move || greeting.get()}
            </h1>
            <p class="mt-2 text-slate-500">"You are signed in."</p>
            <div class="mt-8 grid gap-4 sm:grid-cols-2">
                <a href="/profile" class="block bg-white rounded-lg shadow p-6 hover:shadow-md">
                    <h2 class="font-semibold text-slate-800">"Your profile"</h2>
                    <p class="mt-1 text-sm text-slate-500">
                        "Review the account details Google shared with us."
                    </p>
                </a>
                <div class="block bg-white rounded-lg shadow p-6">
                    <h2 class="font-semibold text-slate-800">"Session"</h2>
                    <p class="mt-1 text-sm text-slate-500">
                        "Your sign-in persists across page reloads until it expires."
                    </p>
                </div>
            </div>
        </div>
    }
}
