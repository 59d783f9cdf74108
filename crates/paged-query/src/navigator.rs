//! Scope Navigator
//!
//! Two scopes, never both active: the collection list, and the item list of
//! one selected collection. The collection list's scroll offset is captured
//! before drilling in and handed back once the list is mounted again.

use log::info;

/// Which scope is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind<C> {
    Collections,
    Items(C),
}

impl<C> ScopeKind<C> {
    pub fn is_collections(&self) -> bool {
        matches!(self, ScopeKind::Collections)
    }
}

#[derive(Debug, Clone)]
pub struct ScopeNavigator<A, C> {
    app: A,
    kind: ScopeKind<C>,
    /// Collection list offset captured on drill-down
    saved_offset: Option<f64>,
    /// Offset waiting for the collection list to mount
    pending_restore: Option<f64>,
    /// Bumped on every drill-down; item scopes are keyed on it
    visit: u64,
}

impl<A, C> ScopeNavigator<A, C>
where
    A: Clone + PartialEq + std::fmt::Debug,
    C: Clone + PartialEq + std::fmt::Debug,
{
    pub fn new(app: A) -> Self {
        Self {
            app,
            kind: ScopeKind::Collections,
            saved_offset: None,
            pending_restore: None,
            visit: 0,
        }
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn kind(&self) -> &ScopeKind<C> {
        &self.kind
    }

    /// Identity of the current item-scope visit
    pub fn visit(&self) -> u64 {
        self.visit
    }

    /// Drill into a collection. `scroll_offset` is the collection list's
    /// offset right now; it is kept until `go_back`.
    pub fn select_collection(&mut self, id: C, scroll_offset: f64) -> bool {
        if !self.kind.is_collections() {
            return false;
        }
        info!("[NAV] Collections -> Items({:?}), saved offset {}", id, scroll_offset);
        self.saved_offset = Some(scroll_offset);
        self.pending_restore = None;
        self.visit += 1;
        self.kind = ScopeKind::Items(id);
        true
    }

    /// Leave the item scope. The saved offset becomes pending until the
    /// collection list reports it is mounted.
    pub fn go_back(&mut self) -> bool {
        if self.kind.is_collections() {
            return false;
        }
        info!("[NAV] Items -> Collections, restoring {:?}", self.saved_offset);
        self.kind = ScopeKind::Collections;
        self.pending_restore = self.saved_offset.take();
        true
    }

    /// Owning app changed: always back to the collection list, nothing to
    /// restore since collection identities belong to the previous app.
    pub fn set_app(&mut self, app: A) -> bool {
        if self.app == app {
            return false;
        }
        info!("[NAV] App {:?} -> {:?}", self.app, app);
        self.app = app;
        self.kind = ScopeKind::Collections;
        self.saved_offset = None;
        self.pending_restore = None;
        true
    }

    /// Second phase of the restore: call once the collection viewport is
    /// mounted and visible. Yields the offset at most once.
    pub fn take_restore_on_mount(&mut self) -> Option<f64> {
        if !self.kind.is_collections() {
            return None;
        }
        self.pending_restore.take()
    }
}
