//! Client configuration
//!
//! Defaults target the same origin that served the page. The API base can be
//! overridden with `?api=<base>` or the `activity-board-api-base` localStorage
//! key; the URL wins.

use web_sys::window;

pub const API_BASE_STORAGE_KEY: &str = "activity-board-api-base";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every endpoint path; empty means same origin
    pub api_base: String,
    /// Auto-hide delay after a sign-up attempt that got an HTTP answer
    pub signup_message_ms: u32,
    /// Auto-hide delay after a successful removal
    pub removal_message_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            signup_message_ms: 5000,
            removal_message_ms: 3000,
        }
    }
}

impl ClientConfig {
    /// Build from the current page location and localStorage
    pub fn load() -> Self {
        let mut config = Self::default();
        let Some(win) = window() else {
            return config;
        };

        if let Ok(Some(storage)) = win.local_storage() {
            if let Ok(Some(base)) = storage.get_item(API_BASE_STORAGE_KEY) {
                config.api_base = base;
            }
        }

        let search = win.location().search().unwrap_or_default();
        if let Some(raw) = query_param(&search, "api") {
            let decoded = js_sys::decode_uri_component(raw)
                .ok()
                .and_then(|s| s.as_string())
                .unwrap_or_else(|| raw.to_string());
            config.api_base = decoded;
        }

        config
    }
}

/// Value of `key` in a `?a=1&b=2` search string (raw, not decoded)
pub fn query_param<'a>(search: &'a str, key: &str) -> Option<&'a str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
        .filter(|v| !v.is_empty())
}
