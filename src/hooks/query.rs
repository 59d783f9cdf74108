//! Paged Query Hook
//!
//! Reactive wrapper around `paged_query::QueryController`: requests the
//! controller hands out are run with `spawn_local` and their outcomes fed
//! back. Dropping the owning scope disposes the controller, so responses that
//! arrive afterwards find nothing to complete and are ignored.
//!
//! The controller itself is not reactive. Three triggers say what changed:
//! the key list, the content of loaded rows, or the loading progress. A flag
//! flip never makes the list re-read its keys, and a row looks itself up by
//! key instead of scanning.

use leptos::prelude::*;
use leptos::task::spawn_local;
use paged_query::{
    run_request, CatalogFilters, Completion, FetchRequest, Keyed, LoadTrigger, PageSource, QueryController,
};

type Controller<T> = QueryController<CatalogFilters, T>;

/// One scope's paged list
pub struct PagedQuery<T: Keyed + 'static, S: 'static> {
    controller: StoredValue<Controller<T>, LocalStorage>,
    /// A page landed or a new generation began
    keys: Trigger,
    /// Loaded rows were replaced or edited in place
    rows: Trigger,
    /// Loading flags, totals or the last failure changed
    progress: Trigger,
    source: StoredValue<S, LocalStorage>,
    trigger: StoredValue<LoadTrigger, LocalStorage>,
}

impl<T: Keyed + 'static, S: 'static> Clone for PagedQuery<T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Keyed + 'static, S: 'static> Copy for PagedQuery<T, S> {}

impl<T, S> PagedQuery<T, S>
where
    T: Keyed + 'static,
    S: PageSource<CatalogFilters, T> + Clone + 'static,
{
    pub fn new(source: S, trigger: StoredValue<LoadTrigger, LocalStorage>) -> Self {
        Self {
            controller: StoredValue::new_local(QueryController::new()),
            keys: Trigger::new(),
            rows: Trigger::new(),
            progress: Trigger::new(),
            source: StoredValue::new_local(source),
            trigger,
        }
    }

    /// Apply new parameters. Returns whether a new generation started.
    pub fn set_parameters(&self, params: CatalogFilters) -> bool {
        let request = self.controller.try_update_value(|c| c.set_parameters(params)).flatten();
        if request.is_some() {
            // items were cleared
            self.keys.notify();
        }
        self.issue(request)
    }

    pub fn load_more(&self) {
        let request = self.controller.try_update_value(|c| c.load_more()).flatten();
        self.issue(request);
    }

    /// Re-issue the last failed request
    pub fn retry(&self) {
        let request = self.controller.try_update_value(|c| c.retry()).flatten();
        self.issue(request);
    }

    /// Replace one loaded item in place
    pub fn update(&self, value: T) {
        let key = value.key();
        if self.controller.try_update_value(|c| c.update(&key, value)).unwrap_or(false) {
            self.rows.notify();
        }
    }

    /// Make the viewport observer call this scope's `load_more`
    pub fn bind_trigger(&self) {
        let this = *self;
        if let Some(trigger) = self.trigger.try_get_value() {
            trigger.retarget(move || this.load_more());
        }
    }

    fn issue(&self, request: Option<FetchRequest<CatalogFilters>>) -> bool {
        let Some(request) = request else {
            return false;
        };
        self.progress.notify();
        self.dispatch(request);
        true
    }

    fn dispatch(&self, request: FetchRequest<CatalogFilters>) {
        let this = *self;
        spawn_local(async move {
            let Some(source) = this.source.try_get_value() else {
                return;
            };
            let (ticket, result) = run_request(&source, request).await;

            let Some(completion) = this.controller.try_update_value(|c| c.complete(ticket, result)) else {
                return;
            };
            match completion {
                Completion::Stale => {}
                Completion::Applied { .. } => {
                    // a first page may bring back keys with new content
                    if ticket.is_first_page() {
                        this.rows.notify();
                    }
                    this.keys.notify();
                    this.progress.notify();
                    if let Some(trigger) = this.trigger.try_get_value() {
                        trigger.page_applied();
                    }
                }
                Completion::Failed(_) => this.progress.notify(),
            }
        });
    }

    // ========================
    // Reads (tracked)
    // ========================

    /// Keys of the loaded items, in arrival order
    pub fn keys(&self) -> Vec<T::Key> {
        self.keys.track();
        self.controller
            .try_with_value(|c| c.state().items().iter().map(Keyed::key).collect())
            .unwrap_or_default()
    }

    /// Loaded item with this key
    pub fn row(&self, key: &T::Key) -> Option<T> {
        self.rows.track();
        self.row_untracked(key)
    }

    pub fn row_untracked(&self, key: &T::Key) -> Option<T> {
        self.controller.try_with_value(|c| c.get(key).cloned()).flatten()
    }

    pub fn status(&self) -> ListStatus {
        self.progress.track();
        self.controller
            .try_with_value(|c| {
                let state = c.state();
                ListStatus {
                    loaded: state.len(),
                    total: state.total(),
                    initial_loading: state.is_initial_loading(),
                    loading_more: state.is_loading_more(),
                    has_more: state.has_more(),
                    no_results: state.is_exhausted_empty(),
                    failure: c.last_failure().map(|e| e.to_string()),
                }
            })
            .unwrap_or_default()
    }
}

/// Progress of one scope, as shown around the list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListStatus {
    pub loaded: usize,
    pub total: usize,
    pub initial_loading: bool,
    pub loading_more: bool,
    pub has_more: bool,
    /// Settled with zero matches
    pub no_results: bool,
    /// Last request failed; `retry` re-issues it
    pub failure: Option<String>,
}

impl ListStatus {
    /// Everything loaded and at least one item shown
    pub fn is_complete(&self) -> bool {
        !self.has_more && !self.initial_loading && self.loaded > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use async_trait::async_trait;
    use any_spawner::Executor;
    use paged_query::{AppId, CollectionId, FetchResponse, FetchResult, Page, RequestToken};
    use tokio::task::LocalSet;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
    }

    impl Keyed for Row {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }
    }

    /// Serves rows `0..len` in pages of `size` and records every request
    #[derive(Clone)]
    struct ScriptedSource {
        len: u32,
        size: u32,
        seen: Rc<RefCell<Vec<(Option<CollectionId>, usize)>>>,
    }

    impl ScriptedSource {
        fn new(len: u32, size: u32) -> Self {
            Self { len, size, seen: Rc::default() }
        }

        fn seen(&self) -> Vec<(Option<CollectionId>, usize)> {
            self.seen.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl PageSource<CatalogFilters, Row> for ScriptedSource {
        async fn fetch(&self, request: FetchRequest<CatalogFilters>) -> FetchResult<Row> {
            self.seen.borrow_mut().push((request.params.collection, request.offset));
            let start = request.offset as u32;
            let end = (start + self.size).min(self.len);
            Ok(FetchResponse {
                page: Page::new((start..end).map(|id| Row { id }).collect(), self.len as usize, end < self.len),
                token: request.token,
            })
        }
    }

    type RowQuery = PagedQuery<Row, ScriptedSource>;

    fn collection(id: u32) -> CatalogFilters {
        CatalogFilters { collection: Some(CollectionId(id)), ..CatalogFilters::for_app(AppId(1)) }
    }

    fn token(query: &RowQuery) -> RequestToken {
        query.controller.with_value(|c| c.token())
    }

    /// Let every spawned fetch and its follow-ups run
    async fn settle() {
        for _ in 0..32 {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn test_complete_needs_items_and_no_more_pages() {
        let done = ListStatus { loaded: 12, total: 12, ..Default::default() };
        assert!(done.is_complete());

        let empty = ListStatus { no_results: true, ..Default::default() };
        assert!(!empty.is_complete());

        let partial = ListStatus { loaded: 12, total: 40, has_more: true, ..Default::default() };
        assert!(!partial.is_complete());
    }

    #[tokio::test]
    async fn test_item_scope_is_discarded_with_its_owner() {
        let _ = Executor::init_tokio();
        let root = Owner::new();
        root.set();

        LocalSet::new()
            .run_until(async {
                let source = ScriptedSource::new(10, 3);
                let trigger = StoredValue::new_local(LoadTrigger::new());

                let collections: RowQuery = PagedQuery::new(source.clone(), trigger);
                collections.set_parameters(CatalogFilters::for_app(AppId(1)));
                settle().await;
                collections.load_more();
                settle().await;
                let kept_token = token(&collections);
                assert_eq!(collections.keys(), (0..6).collect::<Vec<_>>());

                // first visit: one page in, the next still out when the user goes back
                let first_visit = Owner::new();
                let items: RowQuery = first_visit.with(|| PagedQuery::new(source.clone(), trigger));
                items.set_parameters(collection(4));
                settle().await;
                assert_eq!(items.keys(), vec![0, 1, 2]);
                items.load_more();
                first_visit.cleanup();
                settle().await;
                assert!(items.controller.try_with_value(|_| ()).is_none());

                // the collection scope kept its items and generation
                assert_eq!(collections.keys(), (0..6).collect::<Vec<_>>());
                assert_eq!(token(&collections), kept_token);
                assert!(collections.status().has_more);

                // second visit to the same collection starts over
                let second_visit = Owner::new();
                let again: RowQuery = second_visit.with(|| PagedQuery::new(source.clone(), trigger));
                assert!(again.set_parameters(collection(4)));
                assert!(again.status().initial_loading);
                assert!(again.keys().is_empty());
                settle().await;
                assert_eq!(again.keys(), vec![0, 1, 2]);

                let four = Some(CollectionId(4));
                assert_eq!(
                    source.seen(),
                    vec![(None, 0), (None, 3), (four, 0), (four, 3), (four, 0)]
                );
            })
            .await;
    }

    #[tokio::test]
    async fn test_short_pages_keep_loading_while_sentinel_in_range() {
        let _ = Executor::init_tokio();
        let owner = Owner::new();
        owner.set();

        LocalSet::new()
            .run_until(async {
                let source = ScriptedSource::new(7, 3);
                let observer = LoadTrigger::new();
                let query: RowQuery = PagedQuery::new(source.clone(), StoredValue::new_local(observer.clone()));
                query.bind_trigger();

                query.set_parameters(CatalogFilters::for_app(AppId(1)));
                // sentinel is already inside the band; the first page is still out
                observer.observe(true);
                settle().await;

                assert_eq!(query.keys(), (0..7).collect::<Vec<_>>());
                let offsets: Vec<usize> = source.seen().into_iter().map(|(_, offset)| offset).collect();
                assert_eq!(offsets, vec![0, 3, 6]);
                assert!(query.status().is_complete());
            })
            .await;
    }

    #[tokio::test]
    async fn test_sentinel_out_of_range_stops_after_first_page() {
        let _ = Executor::init_tokio();
        let owner = Owner::new();
        owner.set();

        LocalSet::new()
            .run_until(async {
                let source = ScriptedSource::new(7, 3);
                let observer = LoadTrigger::new();
                let query: RowQuery = PagedQuery::new(source.clone(), StoredValue::new_local(observer.clone()));
                query.bind_trigger();

                query.set_parameters(CatalogFilters::for_app(AppId(1)));
                observer.observe(false);
                settle().await;

                assert_eq!(query.keys(), vec![0, 1, 2]);
                assert_eq!(source.seen().len(), 1);
                assert!(query.status().has_more);
            })
            .await;
    }

    #[tokio::test]
    async fn test_update_reaches_row_by_key() {
        let _ = Executor::init_tokio();
        let owner = Owner::new();
        owner.set();

        LocalSet::new()
            .run_until(async {
                let query: RowQuery =
                    PagedQuery::new(ScriptedSource::new(5, 5), StoredValue::new_local(LoadTrigger::new()));
                query.set_parameters(CatalogFilters::for_app(AppId(1)));
                settle().await;

                assert_eq!(query.row(&3), Some(Row { id: 3 }));
                assert_eq!(query.row(&9), None);

                // an edit for a key that is not loaded changes nothing
                query.update(Row { id: 9 });
                assert_eq!(query.keys(), (0..5).collect::<Vec<_>>());
            })
            .await;
    }
}
