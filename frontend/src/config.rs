use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Runtime configuration resolved once per page load. Sources, in order:
/// `window.__GATEHOUSE_ENV` (env.js), `window.__GATEHOUSE_CONFIG`, then a
/// fetched `./config.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub google_client_id: Option<String>,
}

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

static CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

fn read_global(global: &str, keys: &[&str]) -> Option<String> {
    let window = web_sys::window()?;
    let any = js_sys::Reflect::get(&window, &global.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    keys.iter().find_map(|key| {
        js_sys::Reflect::get(&obj, &(*key).into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .and_then(|v| v.as_string())
    })
}

fn snapshot_from_globals() -> Option<RuntimeConfig> {
    for global in ["__GATEHOUSE_ENV", "__GATEHOUSE_CONFIG"] {
        let api_base_url = read_global(global, &["API_BASE_URL", "api_base_url"]);
        let google_client_id = read_global(global, &["GOOGLE_CLIENT_ID", "google_client_id"]);
        if api_base_url.is_some() || google_client_id.is_some() {
            return Some(RuntimeConfig {
                api_base_url,
                google_client_id,
            });
        }
    }
    None
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let resp = reqwest::get("./config.json").await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

async fn resolve() -> RuntimeConfig {
    if let Some(cfg) = snapshot_from_globals() {
        return cfg;
    }
    fetch_runtime_config().await.unwrap_or_default()
}

pub async fn init() {
    if CONFIG.get().is_some() {
        return;
    }
    let cfg = resolve().await;
    let _ = CONFIG.set(cfg);
}

pub async fn await_api_base_url() -> String {
    if CONFIG.get().is_none() {
        init().await;
    }
    api_base_url()
}

pub fn api_base_url() -> String {
    CONFIG
        .get()
        .and_then(|cfg| cfg.api_base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// Absent when the deployment forgot to configure the Google OAuth client;
/// the login page surfaces this as a configuration error.
pub fn google_client_id() -> Option<String> {
    CONFIG.get().and_then(|cfg| cfg.google_client_id.clone())
}
