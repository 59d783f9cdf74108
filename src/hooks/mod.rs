//! Reactive Hooks
//!
//! Leptos bindings for the paged query core.

mod debounce;
mod query;

pub use debounce::{use_debounced, Debounced};
pub use query::{ListStatus, PagedQuery};
