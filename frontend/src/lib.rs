pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod session;

#[cfg(test)]
mod test_support;

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("starting gatehouse frontend");

    leptos::spawn_local(async {
        config::init().await;
        router::mount_app();
    });
}
