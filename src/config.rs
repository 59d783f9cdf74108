//! Browser Configuration
//!
//! Tunables read once at start-up from an optional `window.__CATALOG_CONFIG__`
//! object. Missing fields take their defaults.

use std::time::Duration;

use paged_query::{Lookahead, DEFAULT_LOOKAHEAD_PX, DEFAULT_QUIET_PERIOD};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

const CONFIG_GLOBAL: &str = "__CATALOG_CONFIG__";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Search debounce quiet period
    pub debounce_ms: u64,
    /// Distance below the viewport at which the next page is requested
    pub lookahead_px: f64,
    /// `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_QUIET_PERIOD.as_millis() as u64,
            lookahead_px: DEFAULT_LOOKAHEAD_PX,
            log_level: "info".to_string(),
        }
    }
}

impl BrowserConfig {
    /// Read the config global, falling back to defaults when it is absent
    /// or malformed.
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        match js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
            Ok(value) if !value.is_undefined() && !value.is_null() => Self::from_js(value),
            _ => Self::default(),
        }
    }

    fn from_js(value: JsValue) -> Self {
        match serde_wasm_bindgen::from_value(value) {
            Ok(config) => config,
            Err(e) => {
                web_sys::console::warn_1(&format!("[CONFIG] Ignoring {}: {}", CONFIG_GLOBAL, e).into());
                Self::default()
            }
        }
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn lookahead(&self) -> Lookahead {
        Lookahead::new(self.lookahead_px)
    }

    /// Console log level; unknown names fall back to `Info`
    pub fn level(&self) -> log::Level {
        self.log_level.trim().parse().unwrap_or(log::Level::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BrowserConfig::default();
        assert_eq!(config.quiet_period(), Duration::from_millis(350));
        assert_eq!(config.lookahead().root_margin(), "400px");
        assert_eq!(config.level(), log::Level::Info);
    }

    #[test]
    fn test_partial_object_keeps_other_defaults() {
        let config: BrowserConfig = serde_json::from_str(r#"{"debounce_ms": 200, "log_level": "debug"}"#).unwrap();
        assert_eq!(config.debounce_ms, 200);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.lookahead_px, 400.0);
        assert_eq!(config.level(), log::Level::Debug);
    }

    #[test]
    fn test_level_names() {
        let with = |name: &str| BrowserConfig { log_level: name.to_string(), ..Default::default() }.level();
        assert_eq!(with("WARN"), log::Level::Warn);
        assert_eq!(with(" trace "), log::Level::Trace);
        assert_eq!(with("verbose"), log::Level::Info);
        assert_eq!(with(""), log::Level::Info);
    }
}
