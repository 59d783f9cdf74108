//! Scroll-Triggered Loading
//!
//! The lookahead band around a viewport, and a stable callback
//! slot that the viewport observer calls into. The slot can be re-pointed at
//! another scope's `load_more` without rebuilding the observer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Default distance ahead of the viewport at which loading starts
pub const DEFAULT_LOOKAHEAD_PX: f64 = 400.0;

/// Lookahead band: the viewport grown by a fixed margin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lookahead {
    pub margin: f64,
}

impl Default for Lookahead {
    fn default() -> Self {
        Self { margin: DEFAULT_LOOKAHEAD_PX }
    }
}

impl Lookahead {
    pub fn new(margin: f64) -> Self {
        Self { margin: margin.max(0.0) }
    }

    /// CSS `rootMargin` equivalent of this band
    pub fn root_margin(&self) -> String {
        format!("{}px", self.margin)
    }
}

type LoadFn = Rc<dyn Fn()>;

/// Stable handle the viewport observer fires through.
///
/// Clones share one slot. Firing only forwards to whatever `load_more` is
/// installed; de-duplication is left to `load_more`'s own guard.
#[derive(Clone, Default)]
pub struct LoadTrigger {
    target: Rc<RefCell<Option<LoadFn>>>,
    in_range: Rc<Cell<bool>>,
}

impl std::fmt::Debug for LoadTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadTrigger")
            .field("bound", &self.target.borrow().is_some())
            .field("in_range", &self.in_range.get())
            .finish()
    }
}

impl LoadTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the trigger at the current scope's `load_more`
    pub fn retarget(&self, load_more: impl Fn() + 'static) {
        *self.target.borrow_mut() = Some(Rc::new(load_more));
    }

    /// Observer callback: the sentinel entered or left the band
    pub fn observe(&self, in_range: bool) {
        self.in_range.set(in_range);
        if in_range {
            self.fire();
        }
    }

    /// A page was applied. The observer only reports transitions, so a
    /// sentinel that stayed inside the band needs another nudge.
    pub fn page_applied(&self) {
        if self.in_range.get() {
            self.fire();
        }
    }

    fn fire(&self) {
        // release the borrow before calling out; load_more may retarget
        let target = self.target.borrow().clone();
        if let Some(load_more) = target {
            load_more();
        }
    }
}
