//! Leptos Infinite Scroll Utilities
//!
//! Binds a `paged_query::LoadTrigger` to an `IntersectionObserver` watching a
//! sentinel element inside a scroll container, and restores scroll offsets
//! once a container is back on screen.

use leptos::html;
use leptos::prelude::*;
use paged_query::{LoadTrigger, Lookahead};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>;

/// Live observer plus the closure it calls into
struct Binding {
    observer: web_sys::IntersectionObserver,
    _callback: ObserverCallback,
}

impl Binding {
    fn disconnect(self) {
        self.observer.disconnect();
    }
}

/// Fire `trigger` whenever `sentinel` comes within `lookahead` of the
/// visible part of `root`.
///
/// The observer is rebuilt only when either element changes identity (for
/// example when another scope's container mounts). Parameter changes do not
/// touch it: the trigger is re-pointed instead.
pub fn use_infinite_scroll(
    root: NodeRef<html::Div>,
    sentinel: NodeRef<html::Div>,
    lookahead: Lookahead,
    trigger: LoadTrigger,
) {
    let binding = StoredValue::new_local(None::<Binding>);

    Effect::new(move |_| {
        let root_el = root.get();
        let sentinel_el = sentinel.get();

        release(binding);

        let (Some(root_el), Some(sentinel_el)) = (root_el, sentinel_el) else {
            trigger.observe(false);
            return;
        };

        match bind(&root_el, &sentinel_el, lookahead, trigger.clone()) {
            Ok(bound) => binding.set_value(Some(bound)),
            Err(e) => web_sys::console::error_2(&"[SCROLL] Failed to observe sentinel".into(), &e),
        }
    });

    on_cleanup(move || release(binding));
}

fn release(binding: StoredValue<Option<Binding>, LocalStorage>) {
    binding.try_update_value(|slot| {
        if let Some(old) = slot.take() {
            old.disconnect();
        }
    });
}

fn bind(
    root: &web_sys::HtmlDivElement,
    sentinel: &web_sys::HtmlDivElement,
    lookahead: Lookahead,
    trigger: LoadTrigger,
) -> Result<Binding, JsValue> {
    let callback: ObserverCallback = Closure::new(
        move |entries: js_sys::Array, _observer: web_sys::IntersectionObserver| {
            // batched entries for one target: the last one is current
            if let Some(entry) = entries.iter().last() {
                let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                trigger.observe(entry.is_intersecting());
            }
        },
    );

    let init = web_sys::IntersectionObserverInit::new();
    init.set_root(Some(root.as_ref()));
    init.set_root_margin(&lookahead.root_margin());

    let observer =
        web_sys::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    observer.observe(sentinel);

    Ok(Binding { observer, _callback: callback })
}

/// Current scroll offset of a container, 0 when not mounted
pub fn scroll_offset(root: NodeRef<html::Div>) -> f64 {
    root.get_untracked()
        .map(|el| f64::from(el.scroll_top()))
        .unwrap_or(0.0)
}

/// Jump a container back to the top
pub fn scroll_to_top(root: NodeRef<html::Div>) {
    if let Some(el) = root.get_untracked() {
        el.set_scroll_top(0);
    }
}

/// Restore a saved offset once `root` is mounted.
///
/// `take_offset` is consulted on the next animation frame after the
/// container appears, so layout exists by the time the offset is applied.
pub fn use_scroll_restore<F>(root: NodeRef<html::Div>, take_offset: F)
where
    F: Fn() -> Option<f64> + Clone + 'static,
{
    Effect::new(move |_| {
        let Some(el) = root.get() else {
            return;
        };
        let take_offset = take_offset.clone();
        request_animation_frame(move || {
            if let Some(offset) = take_offset() {
                el.set_scroll_top(offset.round() as i32);
            }
        });
    });
}
