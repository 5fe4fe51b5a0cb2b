use gatehouse_frontend::{config, router};

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("starting gatehouse frontend");

    leptos::spawn_local(async {
        config::init().await;
        router::mount_app();
    });
}
