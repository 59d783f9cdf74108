//! Query Controller
//!
//! Drives paged retrieval for one scope. The controller never performs I/O:
//! `set_parameters`, `load_more` and `retry` hand back a [`FetchRequest`] for
//! the caller to run against a source, and the outcome comes back through
//! [`QueryController::complete`].
//!
//! Stale responses are recognized by token: whatever arrives for a superseded
//! generation is dropped without touching state. Within one generation at
//! most one fetch is outstanding, so pages land in offset order.

use std::collections::HashMap;

use log::{debug, warn};

use crate::page::{FetchError, FetchRequest, FetchResult, FetchTicket};
use crate::state::{Keyed, ScopeState};
use crate::token::{RequestToken, TokenMint};

/// What `complete` did with a response
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Page applied. `received` is the number of items it carried.
    Applied { received: usize },
    /// Response belonged to a superseded request and was dropped
    Stale,
    /// Request failed; prior state kept, `retry` will re-issue it
    Failed(FetchError),
}

/// Paged query controller for one scope
#[derive(Debug)]
pub struct QueryController<P, T: Keyed> {
    mint: TokenMint,
    params: Option<P>,
    state: ScopeState<T>,
    /// Key -> position in `state.items`; first occurrence wins
    positions: HashMap<T::Key, usize>,
    in_flight: Option<FetchTicket>,
    failed: Option<(FetchTicket, FetchError)>,
    first_page_applied: bool,
}

impl<P, T: Keyed> Default for QueryController<P, T> {
    fn default() -> Self {
        Self {
            mint: TokenMint::new(),
            params: None,
            state: ScopeState::default(),
            positions: HashMap::new(),
            in_flight: None,
            failed: None,
            first_page_applied: false,
        }
    }
}

impl<P, T> QueryController<P, T>
where
    P: Clone + PartialEq + std::fmt::Debug,
    T: Keyed,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Current list state
    pub fn state(&self) -> &ScopeState<T> {
        &self.state
    }

    /// Parameters of the current generation
    pub fn params(&self) -> Option<&P> {
        self.params.as_ref()
    }

    pub fn token(&self) -> RequestToken {
        self.state.token
    }

    /// Loaded item with this key
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.positions.get(key).and_then(|&at| self.state.items.get(at))
    }

    /// A fetch for the current generation is outstanding
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Failure of the last request of the current generation, if it failed
    pub fn last_failure(&self) -> Option<&FetchError> {
        self.failed.as_ref().map(|(_, err)| err)
    }

    /// Switch to a new parameter set.
    ///
    /// Equal parameters are a no-op. Anything else starts a new generation:
    /// items are cleared immediately and the first page is requested.
    pub fn set_parameters(&mut self, params: P) -> Option<FetchRequest<P>> {
        if self.params.as_ref() == Some(&params) {
            return None;
        }

        let token = self.mint.mint();
        debug!("[QUERY] New generation {} for {:?}", token, params);

        self.state = ScopeState::pending(token);
        self.positions.clear();
        self.params = Some(params.clone());
        self.failed = None;
        self.first_page_applied = false;

        let request = FetchRequest { offset: 0, params, token };
        self.in_flight = Some(request.ticket());
        Some(request)
    }

    /// Request the next page.
    ///
    /// No-op while a fetch is outstanding or when nothing more remains. If
    /// the first page of the generation never arrived, it is requested again.
    pub fn load_more(&mut self) -> Option<FetchRequest<P>> {
        if self.in_flight.is_some() || !self.state.has_more {
            return None;
        }
        let params = self.params.clone()?;
        let token = self.state.token;

        let offset = if self.first_page_applied {
            self.state.is_loading_more = true;
            self.state.items.len()
        } else {
            self.state.is_initial_loading = true;
            0
        };
        self.failed = None;

        let request = FetchRequest { offset, params, token };
        debug!("[QUERY] Load more {} at offset {}", token, offset);
        self.in_flight = Some(request.ticket());
        Some(request)
    }

    /// Re-issue the request that failed last, unchanged.
    pub fn retry(&mut self) -> Option<FetchRequest<P>> {
        if self.in_flight.is_some() {
            return None;
        }
        let (ticket, _) = self.failed.take()?;
        if ticket.token != self.state.token {
            return None;
        }
        let params = self.params.clone()?;

        if ticket.is_first_page() {
            self.state.is_initial_loading = true;
        } else {
            self.state.is_loading_more = true;
        }
        debug!("[QUERY] Retry {} at offset {}", ticket.token, ticket.offset);
        self.in_flight = Some(ticket);
        Some(FetchRequest { offset: ticket.offset, params, token: ticket.token })
    }

    /// Feed back the outcome of a request issued by this controller.
    pub fn complete(&mut self, ticket: FetchTicket, result: FetchResult<T>) -> Completion {
        if ticket.token != self.state.token || self.in_flight != Some(ticket) {
            debug!(
                "[QUERY] Dropping stale response {} (current {})",
                ticket.token, self.state.token
            );
            return Completion::Stale;
        }

        let response = match result {
            Ok(response) if response.token == ticket.token => response,
            Ok(response) => {
                let err = FetchError::TokenMismatch { sent: ticket.token, received: response.token };
                return self.fail(ticket, err);
            }
            Err(err) => return self.fail(ticket, err),
        };

        let page = response.page;
        let received = page.items.len();
        if ticket.is_first_page() {
            self.state.items = page.items;
            self.positions.clear();
            self.first_page_applied = true;
            self.index_from(0);
        } else {
            let start = self.state.items.len();
            self.state.items.extend(page.items);
            self.index_from(start);
        }
        self.state.total = page.total;
        self.state.has_more = page.has_more;
        self.state.is_initial_loading = false;
        self.state.is_loading_more = false;
        self.in_flight = None;

        debug!(
            "[QUERY] Applied {} items at offset {} ({} of {})",
            received,
            ticket.offset,
            self.state.items.len(),
            self.state.total
        );
        Completion::Applied { received }
    }

    fn fail(&mut self, ticket: FetchTicket, err: FetchError) -> Completion {
        warn!("[QUERY] Fetch {} at offset {} failed: {}", ticket.token, ticket.offset, err);
        if ticket.is_first_page() {
            self.state.is_initial_loading = false;
        } else {
            self.state.is_loading_more = false;
        }
        self.in_flight = None;
        self.failed = Some((ticket, err.clone()));
        Completion::Failed(err)
    }

    fn index_from(&mut self, start: usize) {
        for (at, item) in self.state.items.iter().enumerate().skip(start) {
            self.positions.entry(item.key()).or_insert(at);
        }
    }

    /// Replace one item in place, matched by key. Returns whether it was found.
    pub fn update(&mut self, key: &T::Key, value: T) -> bool {
        match self.positions.get(key).and_then(|&at| self.state.items.get_mut(at)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}
