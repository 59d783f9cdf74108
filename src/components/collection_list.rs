//! Collection List Component
//!
//! Parent scope: the app's collections. The query and filter inputs behind
//! this view are owned by the catalog root, so they survive a visit into a
//! collection and the list comes back exactly as it was left.

use leptos::prelude::*;
use paged_query::CollectionId;

use crate::commands::CollectionSource;
use crate::components::{FilterBar, ListFooter, ResultHeader};
use crate::context::use_catalog;
use crate::format::grouped;
use crate::hooks::{Debounced, PagedQuery};
use crate::models::Collection;
use crate::store::FilterStore;

pub type CollectionQuery = PagedQuery<Collection, CollectionSource>;

#[component]
pub fn CollectionsView(query: CollectionQuery, filters: FilterStore, search: Debounced) -> impl IntoView {
    let ctx = use_catalog();
    let status = Memo::new(move |_| query.status());

    query.bind_trigger();

    view! {
        <section class="scope scope-collections">
            <div class="scope-header">
                <div>
                    <h2>"Collections"</h2>
                    <ResultHeader status=status noun="collections" context=Signal::derive(move || ctx.app_name()) />
                </div>
                <FilterBar store=filters search=search accounts=ctx.accounts placeholder="Search collections..." />
            </div>

            <div class="scope-scroll" node_ref=ctx.root>
                <div class="collection-grid">
                    <For
                        each=move || query.keys()
                        key=|id| *id
                        children=move |id| {
                            query.row_untracked(&id).map(|collection| view! { <CollectionCard collection=collection /> })
                        }
                    />
                </div>
                <ListFooter
                    status=status
                    noun="collections"
                    sentinel=ctx.sentinel
                    on_retry=move |_| query.retry()
                />
            </div>
        </section>
    }
}

#[component]
fn CollectionCard(collection: Collection) -> impl IntoView {
    let ctx = use_catalog();
    let id: CollectionId = collection.id;
    let errors = collection.error_count;

    view! {
        <button class="collection-card" on:click=move |_| ctx.select_collection(id)>
            <div class="collection-card-name">{collection.name.clone()}</div>
            <div class="collection-card-meta">
                <span>{format!("{} creatives", grouped(collection.creative_count as usize))}</span>
                {(errors > 0).then(|| view! {
                    <span class="collection-card-errors">{format!("{} with errors", errors)}</span>
                })}
                <span class="collection-card-date">{collection.created_at.format("%d/%m/%Y").to_string()}</span>
            </div>
        </button>
    }
}
