//! App Selector Component
//!
//! Switches the owning app; always lands on the collection list.

use leptos::prelude::*;
use paged_query::AppId;

use crate::context::use_catalog;

#[component]
pub fn AppSelector() -> impl IntoView {
    let ctx = use_catalog();

    let on_change = move |ev: web_sys::Event| {
        match event_target_value(&ev).parse::<u32>() {
            Ok(id) => ctx.set_app(AppId(id)),
            Err(e) => log::warn!("[APP] Ignoring app selection: {}", e),
        }
    };

    view! {
        <label class="app-selector">
            <span class="app-selector-label">"App"</span>
            <select
                prop:value=move || ctx.app().0.to_string()
                on:change=on_change
            >
                <For
                    each=move || ctx.apps.get()
                    key=|app| app.id
                    children=move |app| {
                        view! { <option value=app.id.0.to_string()>{app.name.clone()}</option> }
                    }
                />
            </select>
        </label>
    }
}
