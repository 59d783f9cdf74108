//! Debounced Signal Hook
//!
//! Settles a raw text signal with `paged_query::Debouncer`, using
//! gloo-timers for the quiet period.

use std::future::Future;
use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use paged_query::{DebounceTicket, Debouncer};

type SharedDebouncer = StoredValue<Debouncer<String>, LocalStorage>;

/// Settled copy of a raw text input
#[derive(Clone, Copy)]
pub struct Debounced {
    pub settled: ReadSignal<String>,
    set_settled: WriteSignal<String>,
    debouncer: SharedDebouncer,
}

impl Debounced {
    /// Publish whatever is pending right away (Enter in the search box)
    pub fn flush(&self) {
        if let Some(Some(value)) = self.debouncer.try_update_value(|d| d.flush()) {
            self.set_settled.set(value);
        }
    }
}

/// Follow `raw`, publishing to `settled` only after `quiet_period` without
/// further changes. Nothing is published once the owning scope is gone.
pub fn use_debounced(raw: Signal<String>, quiet_period: Duration) -> Debounced {
    let (settled, set_settled) = signal(raw.get_untracked());
    let debouncer = owned_debouncer(quiet_period);

    Effect::new(move |prev: Option<()>| {
        let value = raw.get();
        // first run sees the initial value, already settled
        if prev.is_none() {
            return;
        }
        let Some(ticket) = debouncer.try_update_value(|d| d.input(value)) else {
            return;
        };
        spawn_local(async move {
            if let Some(value) = settle(debouncer, ticket, timeout).await {
                log::debug!("[SEARCH] Settled on {:?}", value);
                set_settled.try_set(value);
            }
        });
    });

    Debounced { settled, set_settled, debouncer }
}

/// Debouncer that stops publishing when the current owner is cleaned up
fn owned_debouncer(quiet_period: Duration) -> SharedDebouncer {
    let debouncer = StoredValue::new_local(Debouncer::new(quiet_period));
    on_cleanup(move || {
        debouncer.try_update_value(|d| d.teardown());
    });
    debouncer
}

fn timeout(period: Duration) -> TimeoutFuture {
    TimeoutFuture::new(u32::try_from(period.as_millis()).unwrap_or(u32::MAX))
}

/// Wait out the quiet period for `ticket`. Yields the value to publish if no
/// newer change arrived meanwhile and the owner is still around.
async fn settle<F, Fut>(debouncer: SharedDebouncer, ticket: DebounceTicket, sleep: F) -> Option<String>
where
    F: FnOnce(Duration) -> Fut,
    Fut: Future<Output = ()>,
{
    let period = debouncer.try_with_value(|d| d.quiet_period())?;
    sleep(period).await;
    debouncer.try_update_value(|d| d.lapse(ticket)).flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use paged_query::DEFAULT_QUIET_PERIOD;
    use tokio::task::LocalSet;
    use tokio::time::{sleep, Instant};

    type Published = Rc<RefCell<Vec<(String, Duration)>>>;

    /// One edit of the search box, as the input effect handles it
    fn keystroke(debouncer: SharedDebouncer, value: &str, start: Instant, published: &Published) {
        let ticket = debouncer.try_update_value(|d| d.input(value.to_string())).unwrap();
        let published = published.clone();
        tokio::task::spawn_local(async move {
            if let Some(value) = settle(debouncer, ticket, sleep).await {
                published.borrow_mut().push((value, start.elapsed()));
            }
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_settles_once_after_last_edit() {
        let owner = Owner::new();
        let debouncer = owner.with(|| owned_debouncer(DEFAULT_QUIET_PERIOD));
        let published = Published::default();
        let start = Instant::now();

        LocalSet::new()
            .run_until(async {
                // three edits within 100ms
                for value in ["a", "ab", "abc"] {
                    keystroke(debouncer, value, start, &published);
                    sleep(Duration::from_millis(40)).await;
                }
                sleep(Duration::from_secs(2)).await;
            })
            .await;

        let published = published.borrow();
        assert_eq!(published.len(), 1);
        let (value, at) = &published[0];
        assert_eq!(value, "abc");
        // last edit at 80ms, then the full quiet period
        let expected = Duration::from_millis(80) + DEFAULT_QUIET_PERIOD;
        assert!(*at >= expected && *at < expected + Duration::from_millis(5), "published at {:?}", at);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_published_before_quiet_period_ends() {
        let owner = Owner::new();
        let debouncer = owner.with(|| owned_debouncer(DEFAULT_QUIET_PERIOD));
        let published = Published::default();
        let start = Instant::now();

        LocalSet::new()
            .run_until(async {
                keystroke(debouncer, "boss", start, &published);
                sleep(Duration::from_millis(300)).await;
                assert!(published.borrow().is_empty());
                sleep(Duration::from_millis(100)).await;
                assert_eq!(published.borrow().len(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_owner_cleanup_before_lapse_publishes_nothing() {
        let owner = Owner::new();
        let debouncer = owner.with(|| owned_debouncer(DEFAULT_QUIET_PERIOD));
        let published = Published::default();
        let start = Instant::now();

        LocalSet::new()
            .run_until(async {
                keystroke(debouncer, "abc", start, &published);
                sleep(Duration::from_millis(100)).await;
                owner.cleanup();
                sleep(Duration::from_secs(2)).await;
            })
            .await;

        assert!(published.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_before_lapse_publishes_nothing() {
        let owner = Owner::new();
        let debouncer = owner.with(|| owned_debouncer(DEFAULT_QUIET_PERIOD));
        let published = Published::default();
        let start = Instant::now();

        LocalSet::new()
            .run_until(async {
                keystroke(debouncer, "abc", start, &published);
                sleep(Duration::from_millis(100)).await;
                debouncer.try_update_value(|d| d.teardown());
                sleep(Duration::from_secs(2)).await;
            })
            .await;

        assert!(published.borrow().is_empty());
        // the stored debouncer is still alive, only muted
        assert!(debouncer.try_with_value(|_| ()).is_some());
    }
}
