#![allow(warnings)]
//! Creative Catalog Frontend Entry Point

mod models;
mod commands;
mod config;
mod context;
mod store;
mod format;
mod hooks;
mod components;
mod app;

use app::App;
use config::BrowserConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = BrowserConfig::load();
    if let Err(e) = console_log::init_with_level(config.level()) {
        web_sys::console::warn_1(&format!("[APP] Logger already installed: {}", e).into());
    }
    log::info!("[APP] Starting with {:?}", config);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
