//! List Status Components
//!
//! Result header above a scope's list and the progress footer below it.
//! The footer also carries the sentinel the viewport observer watches.

use leptos::html;
use leptos::prelude::*;

use crate::format::grouped;
use crate::hooks::ListStatus;

/// "Showing N of M <noun> · <context>"
#[component]
pub fn ResultHeader(
    status: Memo<ListStatus>,
    noun: &'static str,
    #[prop(into)] context: Signal<String>,
) -> impl IntoView {
    let summary = move || {
        status.with(|s| {
            if s.initial_loading {
                "Loading…".to_string()
            } else {
                format!("Showing {} of {} {}", grouped(s.loaded), grouped(s.total), noun)
            }
        })
    };

    view! {
        <p class="result-summary">
            {summary}
            <span class="result-context">{move || format!(" · {}", context.get())}</span>
        </p>
    }
}

/// Loading, empty, failure and end-of-list states plus the sentinel
#[component]
pub fn ListFooter(
    status: Memo<ListStatus>,
    noun: &'static str,
    sentinel: NodeRef<html::Div>,
    #[prop(into)] on_retry: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || status.with(|s| s.initial_loading)>
            <div class="list-loading">
                <div class="spinner spinner-large"></div>
                <span>{format!("Loading {}…", noun)}</span>
            </div>
        </Show>

        <Show when=move || status.with(|s| s.no_results)>
            <div class="list-empty">
                <div class="list-empty-icon">"∅"</div>
                <div class="list-empty-title">{format!("No {} found", noun)}</div>
                <div class="list-empty-hint">"Try adjusting your search or filters"</div>
            </div>
        </Show>

        <Show when=move || status.with(|s| s.loading_more && !s.initial_loading)>
            <div class="list-loading-more">
                <div class="spinner"></div>
                <span>
                    {move || status.with(|s| format!("Loading more… ({} / {})", grouped(s.loaded), grouped(s.total)))}
                </span>
            </div>
        </Show>

        {move || status.with(|s| s.failure.clone()).map(|message| view! {
            <div class="list-failure">
                <span title=message>"Couldn't load this page."</span>
                <button class="list-retry-btn" on:click=move |_| on_retry.run(())>"Retry"</button>
            </div>
        })}

        <Show when=move || status.with(|s| s.is_complete())>
            <div class="list-end">
                {move || status.with(|s| format!("All {} {} loaded", grouped(s.loaded), noun))}
            </div>
        </Show>

        <div class="list-sentinel" node_ref=sentinel></div>
    }
}
