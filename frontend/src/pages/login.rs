use leptos::*;
use wasm_bindgen::prelude::*;

use crate::components::layout::{Card, CenteredPage};
use crate::config;
use crate::session::use_login_action;

/// Name of the global callback the Google Identity Services button invokes
/// with a credential response.
pub const CREDENTIAL_CALLBACK: &str = "__gatehouse_on_credential";

#[component]
pub fn LoginPage() -> impl IntoView {
    let (error, set_error) = create_signal(None::<String>);
    let login_action = use_login_action();
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(()) => {
                    set_error.set(None);
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/home");
                    }
                }
                Err(err) => set_error.set(Some(format!("Login failed: {}", err))),
            }
        }
    });

    // The GIS widget lives outside the component tree; it hands the signed
    // credential to a global callback which dispatches the login action.
    let on_credential = Closure::wrap(Box::new(move |response: JsValue| {
        let credential = js_sys::Reflect::get(&response, &"credential".into())
            .ok()
            .and_then(|value| value.as_string());
        match credential {
            Some(credential) => login_action.dispatch(credential),
            None => log::warn!("credential response without a credential field"),
        }
    }) as Box<dyn Fn(JsValue)>);
    if let Some(window) = web_sys::window() {
        let _ = js_sys::Reflect::set(
            &window,
            &CREDENTIAL_CALLBACK.into(),
            on_credential.as_ref(),
        );
    }
    on_credential.forget();

    let missing_client_id = config::google_client_id().is_none();

    view! {
        <CenteredPage>
            <Card>
                <h1 class="text-2xl font-bold text-slate-800 mb-2">"Welcome"</h1>
                <p class="text-slate-500 mb-6">"Sign in with your Google account"</p>
                <Show when=move || missing_client_id>
                    <div class="bg-red-50 border border-red-200 text-red-700 rounded-md px-3 py-2 mb-4 text-sm">
                        "Configuration error: no Google client ID is set for this deployment."
                    </div>
                </Show>
                <Show when=move || error.get().is_some()>
                    <div class="bg-red-50 border border-red-200 text-red-700 rounded-md px-3 py-2 mb-4 text-sm">
                        {move || error.get().unwrap_or_default()}
                    </div>
                </Show>
                <div class="flex justify-center">
                    <div id="google-signin">
                        <Show when=move || pending.get()>
                            <p class="text-slate-400 text-sm">"Authenticating..."</p>
                        </Show>
                    </div>
                </div>
            </Card>
        </CenteredPage>
    }
}
