//! Filter Bar Component
//!
//! Search box and filter selects for one scope. Widgets write raw values into
//! the scope's `FilterStore`; parameters are derived from it elsewhere.

use leptos::prelude::*;
use paged_query::{AspectRatio, StatusFilter};

use crate::hooks::Debounced;
use crate::store::{store_clear_filters, FilterInputsStoreFields, FilterStore};

const ALL: &str = "all";

#[component]
pub fn FilterBar(
    store: FilterStore,
    search: Debounced,
    accounts: ReadSignal<Vec<String>>,
    placeholder: &'static str,
) -> impl IntoView {
    // raw text not yet settled
    let settling = move || store.search().with(|raw| *raw != search.settled.get());

    let on_search_key = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            search.flush();
        }
    };

    view! {
        <div class="filter-search">
            <span class="filter-search-icon">"⌕"</span>
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || store.search().get()
                on:input=move |ev| store.search().set(event_target_value(&ev))
                on:keydown=on_search_key
            />
            <Show when=settling>
                <span class="spinner spinner-small"></span>
            </Show>
        </div>

        <div class="filter-bar">
            <span class="filter-bar-title">"Filters"</span>

            <select
                class="filter-select"
                prop:value=move || store.status().get().as_str()
                on:change=move |ev| store.status().set(StatusFilter::from_str(&event_target_value(&ev)))
            >
                {StatusFilter::ALL.into_iter().map(|status| view! {
                    <option value=status.as_str()>{status.label()}</option>
                }).collect_view()}
            </select>

            <select
                class="filter-select"
                prop:value=move || store.account().get().unwrap_or_else(|| ALL.to_string())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    store.account().set((value != ALL).then_some(value));
                }
            >
                <option value=ALL>"All Accounts"</option>
                <For
                    each=move || accounts.get()
                    key=|name| name.clone()
                    children=move |name| view! { <option value=name.clone()>{name.clone()}</option> }
                />
            </select>

            <select
                class="filter-select"
                prop:value=move || store.ratio().get().map(|r| r.as_str()).unwrap_or(ALL)
                on:change=move |ev| store.ratio().set(AspectRatio::from_str(&event_target_value(&ev)))
            >
                <option value=ALL>"All Ratios"</option>
                {AspectRatio::ALL.into_iter().map(|ratio| view! {
                    <option value=ratio.as_str()>{ratio.as_str()}</option>
                }).collect_view()}
            </select>

            <label class="filter-date">
                <span>"Created after:"</span>
                <input
                    type="date"
                    prop:value=move || store.created_after().get()
                    on:change=move |ev| store.created_after().set(event_target_value(&ev))
                />
            </label>

            <Show when=move || store.with(|inputs| inputs.has_filters())>
                <button class="filter-clear-btn" on:click=move |_| store_clear_filters(&store)>
                    "✕ Clear filters"
                </button>
            </Show>
        </div>
    }
}
