//! Creative Catalog App
//!
//! Loads the app list, then hosts the two catalog scopes: the collection
//! list and, after a drill-down, the creatives of one collection.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_infinite_scroll::{use_infinite_scroll, use_scroll_restore};
use paged_query::{AppId, CollectionId, KeyedMemo, ScopeKind};
use reactive_stores::Store;

use crate::commands::{self, CollectionSource};
use crate::components::{AppSelector, CollectionQuery, CollectionsView, ItemsView};
use crate::config::BrowserConfig;
use crate::context::CatalogContext;
use crate::hooks::{use_debounced, PagedQuery};
use crate::models::CatalogApp;
use crate::store::{store_retain_account, FilterInputs, FilterInputsStoreFields};

#[component]
pub fn App(config: BrowserConfig) -> impl IntoView {
    let (apps, set_apps) = signal(Vec::<CatalogApp>::new());
    let (apps_error, set_apps_error) = signal(None::<String>);

    // Load apps on mount
    spawn_local(async move {
        match commands::list_apps().await {
            Ok(loaded) => {
                log::info!("[APP] Loaded {} apps", loaded.len());
                set_apps.set(loaded);
            }
            Err(e) => {
                log::error!("[APP] Failed to load apps: {}", e);
                set_apps_error.set(Some(e));
            }
        }
    });

    let first_app = Memo::new(move |_| apps.with(|list| list.first().map(|app| app.id)));
    let config = StoredValue::new(config);

    view! {
        <div class="app-layout">
            {move || match first_app.get() {
                Some(initial_app) => view! {
                    <Catalog apps=apps initial_app=initial_app config=config.get_value() />
                }.into_any(),
                None => match apps_error.get() {
                    Some(e) => view! {
                        <div class="app-error">{format!("Couldn't load apps: {}", e)}</div>
                    }.into_any(),
                    None => view! {
                        <div class="app-loading"><div class="spinner spinner-large"></div></div>
                    }.into_any(),
                },
            }}
        </div>
    }
}

#[component]
fn Catalog(apps: ReadSignal<Vec<CatalogApp>>, initial_app: AppId, config: BrowserConfig) -> impl IntoView {
    let (accounts, set_accounts) = signal(Vec::<String>::new());
    let lookahead = config.lookahead();
    let quiet_period = config.quiet_period();

    let ctx = CatalogContext::new(initial_app, apps, accounts, config);
    provide_context(ctx);

    // Collection scope: owned here so it outlives item-scope visits
    let filters = Store::new(FilterInputs::default());
    let search = use_debounced(Signal::derive(move || filters.search().get()), quiet_period);
    let collections: CollectionQuery = PagedQuery::new(CollectionSource, ctx.trigger);

    let params = Memo::new(move |_| {
        let settled = search.settled.get();
        filters.with(|inputs| inputs.to_filters(&settled, ctx.app(), None))
    });

    Effect::new(move |_| {
        collections.set_parameters(params.get());
    });

    // Account filter options, cached for the current app
    let account_cache = StoredValue::new_local(KeyedMemo::<AppId, Vec<String>>::new());
    let apply_accounts = move |list: Vec<String>| {
        store_retain_account(&filters, &list);
        set_accounts.set(list);
    };
    Effect::new(move |_| {
        let app = ctx.app();
        if let Some(cached) = account_cache.with_value(|cache| cache.get(&app).cloned()) {
            apply_accounts(cached);
            return;
        }
        spawn_local(async move {
            match commands::list_accounts(app).await {
                Ok(list) => {
                    account_cache.update_value(|cache| cache.insert(app, list.clone()));
                    // app may have changed while the lookup was out
                    if ctx.navigator.with_untracked(|n| *n.app()) == app {
                        apply_accounts(list);
                    }
                }
                Err(e) => log::warn!("[APP] Failed to load accounts for {:?}: {}", app, e),
            }
        });
    });

    use_infinite_scroll(ctx.root, ctx.sentinel, lookahead, ctx.trigger.get_value());
    use_scroll_restore(ctx.root, move || ctx.take_restore());

    let scope = Memo::new(move |_| ctx.scope());
    let collection_name = move |id: CollectionId| {
        Signal::derive(move || collections.row(&id).map(|c| c.name).unwrap_or_default())
    };

    view! {
        <header class="catalog-topbar">
            <h1>"Creatives"</h1>
            <AppSelector />
        </header>
        <main class="catalog-main">
            {move || match scope.get() {
                (ScopeKind::Collections, _) => view! {
                    <CollectionsView query=collections filters=filters search=search />
                }.into_any(),
                (ScopeKind::Items(id), _) => view! {
                    <ItemsView collection=id collection_name=collection_name(id) />
                }.into_any(),
            }}
        </main>
    }
}
