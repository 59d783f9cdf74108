//! Page Sources
//!
//! The fetch contract the controller depends on, and a single-key memo that
//! sources may use for data that only changes with its key.

use async_trait::async_trait;

use crate::page::{FetchRequest, FetchResult, FetchTicket};

/// Asynchronous paged data source.
///
/// Implementations must echo the request token in the response and should be
/// free of side effects: superseded requests still run to completion and
/// their results are thrown away.
#[async_trait(?Send)]
pub trait PageSource<P, T> {
    async fn fetch(&self, request: FetchRequest<P>) -> FetchResult<T>;
}

/// Run a request against a source, keeping the ticket next to the result
/// so it can be handed straight to `QueryController::complete`.
pub async fn run_request<P, T, S>(source: &S, request: FetchRequest<P>) -> (FetchTicket, FetchResult<T>)
where
    S: PageSource<P, T> + ?Sized,
{
    let ticket = request.ticket();
    let result = source.fetch(request).await;
    (ticket, result)
}

/// Caches one value for one key. Asking with a different key drops the
/// cached value.
#[derive(Debug, Clone)]
pub struct KeyedMemo<K, V> {
    entry: Option<(K, V)>,
}

impl<K, V> Default for KeyedMemo<K, V> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<K: PartialEq, V> KeyedMemo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, if that is the key currently held
    pub fn get(&self, key: &K) -> Option<&V> {
        match &self.entry {
            Some((k, v)) if k == key => Some(v),
            _ => None,
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.entry = Some((key, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{Completion, QueryController};
    use crate::page::{FetchError, FetchResponse, Page};
    use crate::state::Keyed;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(usize);

    impl Keyed for Row {
        type Key = usize;

        fn key(&self) -> usize {
            self.0
        }
    }

    /// Serves `0..len` in pages of `size`, records every request
    struct CountingSource {
        len: usize,
        size: usize,
        seen: RefCell<Vec<usize>>,
        fail_offsets: Vec<usize>,
    }

    #[async_trait(?Send)]
    impl PageSource<String, Row> for CountingSource {
        async fn fetch(&self, request: FetchRequest<String>) -> FetchResult<Row> {
            self.seen.borrow_mut().push(request.offset);
            if self.fail_offsets.contains(&request.offset) {
                return Err(FetchError::Transport("connection reset".into()));
            }
            let end = (request.offset + self.size).min(self.len);
            let items = (request.offset..end).map(Row).collect();
            Ok(FetchResponse {
                page: Page::new(items, self.len, end < self.len),
                token: request.token,
            })
        }
    }

    #[tokio::test]
    async fn test_drains_source_page_by_page() {
        let source = CountingSource { len: 10, size: 4, seen: RefCell::new(Vec::new()), fail_offsets: vec![] };
        let mut qc: QueryController<String, Row> = QueryController::new();

        let mut next = qc.set_parameters(String::new());
        while let Some(request) = next {
            let (ticket, result) = run_request(&source, request).await;
            assert!(matches!(qc.complete(ticket, result), Completion::Applied { .. }));
            next = qc.load_more();
        }

        let got: Vec<usize> = qc.state().items().iter().map(|r| r.0).collect();
        assert_eq!(got, (0..10).collect::<Vec<_>>());
        assert_eq!(*source.seen.borrow(), vec![0, 4, 8]);
        assert!(!qc.state().has_more());
    }

    #[tokio::test]
    async fn test_failed_page_is_retried_transparently() {
        let source = CountingSource { len: 6, size: 3, seen: RefCell::new(Vec::new()), fail_offsets: vec![3] };
        let mut qc: QueryController<String, Row> = QueryController::new();

        let first = qc.set_parameters("q".to_string()).unwrap();
        let (ticket, result) = run_request(&source, first).await;
        qc.complete(ticket, result);

        let second = qc.load_more().unwrap();
        let (ticket, result) = run_request(&source, second).await;
        assert!(matches!(qc.complete(ticket, result), Completion::Failed(_)));
        assert_eq!(qc.state().len(), 3);

        let again = qc.retry().unwrap();
        assert_eq!(again.offset, 3);
        assert_eq!(*source.seen.borrow(), vec![0, 3]);
    }

    #[test]
    fn test_memo_holds_one_key_at_a_time() {
        let mut memo: KeyedMemo<u32, Vec<&'static str>> = KeyedMemo::new();
        assert!(memo.get(&1).is_none());

        memo.insert(1, vec!["Google - US Main"]);
        assert_eq!(memo.get(&1).map(|v| v.len()), Some(1));
        assert!(memo.get(&2).is_none());

        memo.insert(2, vec!["FB - US Broad", "FB - EU Lookalike"]);
        assert_eq!(memo.get(&2).map(|v| v.len()), Some(2));
        assert!(memo.get(&1).is_none());
    }
}
