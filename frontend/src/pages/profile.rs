use leptos::*;

use crate::session::use_session;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let controller = use_session();
    let user = create_memo(move |_| controller.current_user());
    view! {
        <div class="max-w-3xl mx-auto py-10 px-4">
            <h1 class="text-3xl font-bold text-slate-800 mb-6">"Profile"</h1>
            {move || {
                user.get().map(|user| {
                    let picture = user.profile_picture.clone();
                    view! {
                        <div class="bg-white rounded-lg shadow p-6 space-y-3">
                            {picture.map(|src| view! {
                                <img class="w-16 h-16 rounded-full" src=src alt="Profile picture"/>
                            })}
                            <p class="text-lg font-semibold text-slate-800">
                                {user.display_name()}
                            </p>
                            <p class="text-sm text-slate-500">{user.email.clone()}</p>
                            <p class="text-sm text-slate-400">
                                {format!("Member since {}", user.created_at.format("%B %Y"))}
                            </p>
                        </div>
                    }
                })
            }}
        </div>
    }
}
