//! Scope State
//!
//! Accumulated list state of one scope. Read-only outside the controller.

use crate::token::RequestToken;

/// Anything listed in a scope: carries an identity for keyed rendering and
/// in-place updates.
pub trait Keyed: Clone {
    /// The type of the item's identity
    type Key: Clone + Eq + std::hash::Hash;

    /// Returns the item's identity
    fn key(&self) -> Self::Key;
}

/// List state of one scope
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeState<T> {
    pub(crate) items: Vec<T>,
    pub(crate) total: usize,
    pub(crate) is_initial_loading: bool,
    pub(crate) is_loading_more: bool,
    pub(crate) has_more: bool,
    pub(crate) token: RequestToken,
}

impl<T> ScopeState<T> {
    /// Fresh state for a new generation: empty, first page pending
    pub(crate) fn pending(token: RequestToken) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            is_initial_loading: true,
            is_loading_more: false,
            has_more: true,
            token,
        }
    }

    /// Accumulated items, in arrival order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Total reported by the last applied page
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_initial_loading(&self) -> bool {
        self.is_initial_loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Settled with zero matches: the "no results" terminal state
    pub fn is_exhausted_empty(&self) -> bool {
        !self.is_initial_loading && !self.has_more && self.items.is_empty()
    }
}

impl<T> Default for ScopeState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            is_initial_loading: false,
            is_loading_more: false,
            has_more: false,
            token: RequestToken::default(),
        }
    }
}
