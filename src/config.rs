//! API Configuration
//!
//! Resolves the backend base URL once at startup. The hosting page may inject
//! `window.__RUNTIME_CONFIG__.API_BASE_URL`; otherwise the build-time
//! `API_BASE_URL` env var applies, then a localhost default for development.
//! The resolved value is passed to the transport client by value — it is
//! never re-read as ambient global state.

use wasm_bindgen::JsValue;

/// Default backend for local development.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Immutable transport configuration, resolved once in `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Resolve the base URL: runtime-injected config wins, then the
    /// build-time value, then the default.
    pub fn load() -> Self {
        let raw = runtime_base_url()
            .or_else(|| option_env!("API_BASE_URL").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = normalize_base_url(&raw);
        web_sys::console::log_1(&format!("[CONFIG] API base URL: {}", base_url).into());
        Self { base_url }
    }
}

/// Read `window.__RUNTIME_CONFIG__.API_BASE_URL` if the hosting page set it.
fn runtime_base_url() -> Option<String> {
    let window = web_sys::window()?;
    let config = js_sys::Reflect::get(&window, &JsValue::from_str("__RUNTIME_CONFIG__")).ok()?;
    if !config.is_object() {
        return None;
    }
    let url = js_sys::Reflect::get(&config, &JsValue::from_str("API_BASE_URL")).ok()?;
    url.as_string().filter(|s| !s.is_empty())
}

/// Strip trailing slashes, and truncate at `/api/v1` when operators paste a
/// full endpoint URL — the client appends the API path itself.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    match trimmed.find("/api/v1") {
        Some(idx) => trimmed[..idx].to_string(),
        None => trimmed.to_string(),
    }
}
