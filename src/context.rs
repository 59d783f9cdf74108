//! Catalog Context
//!
//! Shared state provided via Leptos Context API.

use leptos::html;
use leptos::prelude::*;
use paged_query::{AppId, CollectionId, LoadTrigger, ScopeKind, ScopeNavigator};

use crate::config::BrowserConfig;
use crate::models::CatalogApp;

pub type Navigator = ScopeNavigator<AppId, CollectionId>;

/// Catalog-wide handles provided via context
#[derive(Clone, Copy)]
pub struct CatalogContext {
    /// Active scope, owning app and the saved collection list offset
    pub navigator: RwSignal<Navigator>,
    /// Apps for the selector
    pub apps: ReadSignal<Vec<CatalogApp>>,
    /// Account names of the current app
    pub accounts: ReadSignal<Vec<String>>,
    /// Scroll container of whichever scope is mounted
    pub root: NodeRef<html::Div>,
    /// End-of-list marker inside `root`
    pub sentinel: NodeRef<html::Div>,
    /// Slot the viewport observer fires into
    pub trigger: StoredValue<LoadTrigger, LocalStorage>,
    pub config: StoredValue<BrowserConfig>,
}

impl CatalogContext {
    pub fn new(
        initial_app: AppId,
        apps: ReadSignal<Vec<CatalogApp>>,
        accounts: ReadSignal<Vec<String>>,
        config: BrowserConfig,
    ) -> Self {
        Self {
            navigator: RwSignal::new(ScopeNavigator::new(initial_app)),
            apps,
            accounts,
            root: NodeRef::new(),
            sentinel: NodeRef::new(),
            trigger: StoredValue::new_local(LoadTrigger::new()),
            config: StoredValue::new(config),
        }
    }

    /// Current owning app (tracked)
    pub fn app(&self) -> AppId {
        self.navigator.with(|n| *n.app())
    }

    pub fn app_name(&self) -> String {
        let app = self.app();
        self.apps
            .with(|apps| apps.iter().find(|a| a.id == app).map(|a| a.name.clone()))
            .unwrap_or_default()
    }

    /// Drill into a collection, remembering where the collection list was
    pub fn select_collection(&self, id: CollectionId) {
        let offset = leptos_infinite_scroll::scroll_offset(self.root);
        self.navigator.update(|n| {
            n.select_collection(id, offset);
        });
    }

    pub fn go_back(&self) {
        self.navigator.update(|n| {
            n.go_back();
        });
    }

    pub fn set_app(&self, app: AppId) {
        let changed = self.navigator.try_update(|n| n.set_app(app)).unwrap_or(false);
        if changed {
            leptos_infinite_scroll::scroll_to_top(self.root);
        }
    }

    /// Scope to render plus the visit it belongs to
    pub fn scope(&self) -> (ScopeKind<CollectionId>, u64) {
        self.navigator.with(|n| (*n.kind(), n.visit()))
    }

    /// Offset to apply once the collection list is mounted again
    pub fn take_restore(&self) -> Option<f64> {
        self.navigator.try_update_untracked(|n| n.take_restore_on_mount()).flatten()
    }
}

pub fn use_catalog() -> CatalogContext {
    expect_context::<CatalogContext>()
}
