//! Tauri Command Wrappers
//!
//! Frontend bindings to the catalog host's commands.

mod catalog;

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Host rejections arrive as plain strings; anything else is debug-printed
fn rejection_message(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

pub use catalog::*;
