//! Creative List Component
//!
//! Child scope: creatives of one collection. Query, filter inputs and
//! search debounce are created here and disposed with the view, so going
//! back discards the whole scope.

use leptos::prelude::*;
use paged_query::CollectionId;
use reactive_stores::Store;

use crate::commands::CreativeSource;
use crate::components::{FilterBar, ListFooter, ResultHeader};
use crate::context::use_catalog;
use crate::format::{compact, ctr};
use crate::hooks::{use_debounced, PagedQuery};
use crate::models::{Account, Creative, DistributionStatus};
use crate::store::{FilterInputs, FilterInputsStoreFields};

type CreativeQuery = PagedQuery<Creative, CreativeSource>;

#[component]
pub fn ItemsView(collection: CollectionId, #[prop(into)] collection_name: Signal<String>) -> impl IntoView {
    let ctx = use_catalog();
    let config = ctx.config.get_value();

    let filters = Store::new(FilterInputs::default());
    let search = use_debounced(Signal::derive(move || filters.search().get()), config.quiet_period());
    let query: CreativeQuery = PagedQuery::new(CreativeSource, ctx.trigger);
    let status = Memo::new(move |_| query.status());

    let params = Memo::new(move |_| {
        let settled = search.settled.get();
        filters.with(|inputs| inputs.to_filters(&settled, ctx.app(), Some(collection)))
    });

    query.bind_trigger();

    Effect::new(move |_| {
        query.set_parameters(params.get());
    });

    view! {
        <section class="scope scope-creatives">
            <div class="scope-header">
                <div>
                    <button class="back-btn" on:click=move |_| ctx.go_back()>"← Collections"</button>
                    <h2>{move || collection_name.get()}</h2>
                    <ResultHeader status=status noun="creatives" context=Signal::derive(move || ctx.app_name()) />
                </div>
                <FilterBar store=filters search=search accounts=ctx.accounts placeholder="Search creatives..." />
            </div>

            <div class="scope-scroll" node_ref=ctx.root>
                <div class="creative-grid">
                    <For
                        each=move || query.keys()
                        key=|id| *id
                        children=move |id| {
                            query.row_untracked(&id).map(|initial| {
                                let current = Memo::new(move |_| query.row(&id).unwrap_or_else(|| initial.clone()));
                                view! { <CreativeCard creative=current on_update=move |updated: Creative| query.update(updated) /> }
                            })
                        }
                    />
                </div>
                <ListFooter
                    status=status
                    noun="creatives"
                    sentinel=ctx.sentinel
                    on_retry=move |_| query.retry()
                />
            </div>
        </section>
    }
}

#[component]
fn CreativeCard(creative: Memo<Creative>, #[prop(into)] on_update: Callback<Creative>) -> impl IntoView {
    let (details_open, set_details_open) = signal(false);
    let summary = Memo::new(move |_| creative.with(|c| c.summary()));

    let retry = Callback::new(move |(platform, idx): (String, usize)| {
        on_update.run(creative.with_untracked(|c| c.with_retried(&platform, idx)));
    });
    let cancel = Callback::new(move |(platform, idx): (String, usize)| {
        on_update.run(creative.with_untracked(|c| c.with_cancelled(&platform, idx)));
    });

    // identity and stats never change through account actions
    let c = creative.get_untracked();
    let thumb_style = format!("background: {}", c.thumbnail);
    let stats = vec![
        format!("Resolution {}", c.resolution),
        format!("Campaigns {}", c.campaigns),
        format!("Impressions {}", compact(c.impressions)),
        format!("Clicks {}", compact(c.clicks)),
        format!("CTR {}", ctr(c.clicks, c.impressions)),
        format!("Created {}", c.created_at.format("%d/%m/%Y")),
    ];
    let platform_names: Vec<String> = c.platforms.iter().map(|p| p.name.clone()).collect();

    view! {
        <article class="creative-card">
            <div class="creative-thumb" style=thumb_style>
                <span class="creative-ratio">{c.ratio.as_str()}</span>
                <span class="creative-duration">{c.duration.clone()}</span>
            </div>

            <div class="creative-body">
                <div class="creative-name" title=c.name.clone()>{c.name.clone()}</div>
                <div class="creative-summary">
                    <span class="summary-uploaded">
                        {move || summary.with(|s| format!("{}/{} uploaded", s.uploaded, s.total))}
                    </span>
                    <Show when=move || summary.with(|s| s.errors > 0)>
                        <span class="summary-errors">
                            {move || summary.with(|s| format!("{} errors", s.errors))}
                        </span>
                    </Show>
                </div>

                <button class="details-toggle" on:click=move |_| set_details_open.update(|open| *open = !*open)>
                    {move || if details_open.get() { "Hide details" } else { "Details" }}
                </button>
                <Show when=move || details_open.get()>
                    <div class="creative-stats">
                        {stats.iter().map(|line| view! { <span>{line.clone()}</span> }).collect_view()}
                    </div>
                </Show>

                <div class="creative-platforms">
                    {platform_names.into_iter().map(|name| view! {
                        <PlatformSection creative=creative name=name on_retry=retry on_cancel=cancel />
                    }).collect_view()}
                </div>
            </div>
        </article>
    }
}

/// One platform of a creative. Reads the platform from the live creative so
/// account actions update it in place without collapsing the section.
#[component]
fn PlatformSection(
    creative: Memo<Creative>,
    name: String,
    on_retry: Callback<(String, usize)>,
    on_cancel: Callback<(String, usize)>,
) -> impl IntoView {
    let (open, set_open) = signal(false);
    let platform = {
        let name = name.clone();
        Memo::new(move |_| creative.with(|c| c.platforms.iter().find(|p| p.name == name).cloned()))
    };
    let link = platform.with_untracked(|p| p.as_ref().and_then(|p| p.link.clone()));

    let health = move || platform.with(|p| p.as_ref().map(|p| p.health_class()).unwrap_or_default());
    let counts = move || {
        platform.with(|p| {
            p.as_ref()
                .map(|p| (p.uploaded_count(), p.accounts.len(), p.error_count(), p.skipped_count()))
                .unwrap_or_default()
        })
    };
    let accounts = move || platform.with(|p| p.as_ref().map(|p| p.accounts.clone()).unwrap_or_default());

    view! {
        <div class=move || format!("platform {}", health())>
            <button class="platform-header" on:click=move |_| set_open.update(|o| *o = !*o)>
                <span class="platform-caret" class:open=move || open.get()>"▶"</span>
                <span class="platform-name">{name.clone()}</span>
                <span class="platform-count">
                    {move || { let (uploaded, total, _, _) = counts(); format!("{}/{}", uploaded, total) }}
                </span>
                <Show when=move || (counts().2 > 0)>
                    <span class="platform-errors">{move || format!("{} err", counts().2)}</span>
                </Show>
                <Show when=move || (counts().3 > 0)>
                    <span class="platform-skipped">{move || format!("{} skip", counts().3)}</span>
                </Show>
                {link.map(|link| view! {
                    <a
                        class="platform-link"
                        href=link
                        target="_blank"
                        rel="noopener noreferrer"
                        on:click=|ev| ev.stop_propagation()
                    >
                        "↗ Link"
                    </a>
                })}
            </button>
            <Show when=move || open.get()>
                <div class="platform-accounts">
                    {
                        let name = name.clone();
                        move || {
                            accounts().into_iter().enumerate().map(|(idx, account)| {
                                let retry_name = name.clone();
                                let cancel_name = name.clone();
                                view! {
                                    <AccountRow
                                        account=account
                                        on_retry=move || on_retry.run((retry_name.clone(), idx))
                                        on_cancel=move || on_cancel.run((cancel_name.clone(), idx))
                                    />
                                }
                            }).collect_view()
                        }
                    }
                </div>
            </Show>
        </div>
    }
}

#[component]
fn AccountRow(
    account: Account,
    on_retry: impl Fn() + Send + Sync + 'static,
    on_cancel: impl Fn() + Send + Sync + 'static,
) -> impl IntoView {
    let (show_reason, set_show_reason) = signal(false);
    let status = account.status;
    let skip_reason = account.skip_reason.clone().filter(|_| status == DistributionStatus::Skipped);
    let has_reason = skip_reason.is_some();

    view! {
        <div class="account-row">
            <div class="account-line">
                <span class="account-name">{account.account_name.clone()}</span>
                <span class=format!("account-status {}", status.css_class())>{status.label()}</span>
                {status.is_error().then(|| view! {
                    <button class="account-action" on:click=move |_| on_retry()>"Retry"</button>
                })}
                {(status == DistributionStatus::Removing).then(|| view! {
                    <button class="account-action" on:click=move |_| on_cancel()>"Cancel"</button>
                })}
                {has_reason.then(|| view! {
                    <button class="account-action" on:click=move |_| set_show_reason.update(|s| *s = !*s)>
                        {move || if show_reason.get() { "Hide" } else { "Why?" }}
                    </button>
                })}
            </div>
            {skip_reason.map(|reason| view! {
                <Show when=move || show_reason.get()>
                    <div class="account-skip-reason">{reason.clone()}</div>
                </Show>
            })}
        </div>
    }
}
