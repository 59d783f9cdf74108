//! Paged Query
//!
//! UI-agnostic core of the catalog browser:
//! - token: request generations
//! - page: fetch requests, pages and errors
//! - state / controller: per-scope list state and the paginated query controller
//! - source: the asynchronous fetch contract
//! - debounce: settling of free-text input
//! - trigger: lookahead band and the load-more callback slot
//! - navigator: collection list / item list drill-down
//! - filters: the catalog's parameter record
//!
//! Nothing here performs I/O or touches the DOM; the frontend runs requests
//! and timers and feeds the outcomes back.

mod token;
mod page;
mod state;
mod controller;
mod source;
mod debounce;
mod trigger;
mod navigator;
mod filters;

pub use token::{RequestToken, TokenMint};
pub use page::{FetchError, FetchRequest, FetchResponse, FetchResult, FetchTicket, Page};
pub use state::{Keyed, ScopeState};
pub use controller::{Completion, QueryController};
pub use source::{run_request, KeyedMemo, PageSource};
pub use debounce::{DebounceTicket, Debouncer, DEFAULT_QUIET_PERIOD};
pub use trigger::{LoadTrigger, Lookahead, DEFAULT_LOOKAHEAD_PX};
pub use navigator::{ScopeKind, ScopeNavigator};
pub use filters::{parse_date_input, AppId, AspectRatio, CatalogFilters, CollectionId, StatusFilter};
