//! Filter Input Store
//!
//! Raw filter widget values for one scope, with field-level reactivity via
//! reactive_stores. The search text here is the unsettled value; the
//! debounced copy is combined in when parameters are built.

use leptos::prelude::*;
use reactive_stores::Store;
use paged_query::{parse_date_input, AppId, AspectRatio, CatalogFilters, CollectionId, StatusFilter};

#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct FilterInputs {
    /// Search box text as typed
    pub search: String,
    pub status: StatusFilter,
    /// `None` = all accounts
    pub account: Option<String>,
    /// `None` = all ratios
    pub ratio: Option<AspectRatio>,
    /// `<input type="date">` value, empty when unset
    pub created_after: String,
}

impl FilterInputs {
    /// Parameters for a scope, using the settled search text
    pub fn to_filters(&self, settled_search: &str, app: AppId, collection: Option<CollectionId>) -> CatalogFilters {
        CatalogFilters {
            search: settled_search.trim().to_string(),
            status: self.status,
            account: self.account.clone(),
            ratio: self.ratio,
            created_after: parse_date_input(&self.created_after),
            app,
            collection,
        }
    }

    /// Any filter besides the search box is set
    pub fn has_filters(&self) -> bool {
        self.status != StatusFilter::All
            || self.account.is_some()
            || self.ratio.is_some()
            || !self.created_after.is_empty()
    }
}

pub type FilterStore = Store<FilterInputs>;

// ========================
// Store Helper Functions
// ========================

/// Reset status, account, ratio and date; the search box is left alone
pub fn store_clear_filters(store: &FilterStore) {
    store.status().set(StatusFilter::All);
    store.account().set(None);
    store.ratio().set(None);
    store.created_after().set(String::new());
}

/// Drop an account selection that no longer exists (after an app switch)
pub fn store_retain_account(store: &FilterStore, accounts: &[String]) {
    let stale = store
        .account()
        .with_untracked(|selected| selected.as_ref().is_some_and(|name| !accounts.contains(name)));
    if stale {
        store.account().set(None);
    }
}
