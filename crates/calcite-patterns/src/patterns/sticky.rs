//! Elements pinned to the viewport once scrolled past.
//!
//! # Design
//! - Each `.js-sticky` element gets a deep-cloned shim inserted before it. The
//!   shim carries `is-sticky` and is positioned at the element's `data-top`.
//! - A recurring timer compares each element's threshold with the scroll
//!   offset and shows or hides the shim. Layout is re-read on every tick.
//! - [`StickyHandle`] owns the timer and the shims; stopping or dropping it
//!   cancels the timer and removes the shims.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use calcite_dom::{Dom, TimerId, add_class, remove_class};

use crate::binding::Binding;
use crate::context::PatternContext;
use crate::pattern::Pattern;

const STICKY: &str = "js-sticky";
const SHIM: &str = "is-sticky";
const DATA_TOP: &str = "data-top";

/// Leading integer of a `data-top` value; anything unparsable is `0`.
#[must_use]
pub fn parse_data_top(raw: Option<&str>) -> i64 {
    let Some(raw) = raw.map(str::trim_start) else {
        return 0;
    };
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value = digits[..end].parse::<i64>().unwrap_or(0);
    if negative { -value } else { value }
}

struct StickyItem<N> {
    element: N,
    shim: N,
    data_top: i64,
    visible: Cell<bool>,
}

impl<N> StickyItem<N> {
    #[allow(clippy::cast_precision_loss)]
    fn threshold<D: Dom<Node = N>>(&self, dom: &D) -> f64 {
        dom.offset_top(&self.element) - self.data_top as f64
    }
}

fn refresh<D: Dom>(dom: &D, items: &[StickyItem<D::Node>]) {
    let scrolled = dom.scroll_offset();
    for item in items {
        let visible = item.threshold(dom) < scrolled;
        if visible == item.visible.get() {
            continue;
        }
        item.visible.set(visible);
        let display = if visible { None } else { Some("none") };
        dom.set_style(&item.shim, "display", display);
        tracing::trace!(visible, "sticky shim toggled");
    }
}

/// Running sticky controller.
pub struct StickyHandle<D: Dom> {
    dom: D,
    items: Rc<Vec<StickyItem<D::Node>>>,
    timer: Option<TimerId>,
}

impl<D: Dom> StickyHandle<D> {
    /// Insert shims for every `.js-sticky` under `root` and start polling at
    /// the configured interval. Nothing is scheduled when there are no
    /// sticky elements.
    #[must_use]
    pub fn start(ctx: &PatternContext<D>, root: Option<&D::Node>) -> Self {
        let dom = ctx.dom().clone();
        let mut items = Vec::new();

        for element in ctx.find(root, STICKY) {
            let Some(parent) = dom.parent(&element) else {
                continue;
            };
            let Some(shim) = dom.clone_deep(&element) else {
                continue;
            };
            let data_top = parse_data_top(dom.attribute(&element, DATA_TOP).as_deref());

            remove_class(&dom, &shim, STICKY);
            add_class(&dom, &shim, SHIM);
            dom.set_style(&shim, "top", Some(&format!("{data_top}px")));
            dom.set_style(&shim, "display", Some("none"));
            dom.insert_before(&parent, &shim, &element);

            items.push(StickyItem {
                element,
                shim,
                data_top,
                visible: Cell::new(false),
            });
        }

        let items = Rc::new(items);
        let timer = if items.is_empty() {
            None
        } else {
            let tick_dom = dom.clone();
            let tick_items = Rc::clone(&items);
            Some(dom.every(
                ctx.config().sticky_interval(),
                Rc::new(move || refresh(&tick_dom, &tick_items)),
            ))
        };
        tracing::debug!(elements = items.len(), "sticky started");

        Self { dom, items, timer }
    }

    /// Whether the polling timer is live.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Number of tracked elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no sticky element was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Shims in document order.
    #[must_use]
    pub fn shims(&self) -> Vec<D::Node> {
        self.items.iter().map(|item| item.shim.clone()).collect()
    }

    /// Cancel the timer and remove the shims. Idempotent.
    pub fn stop(&mut self) {
        let Some(timer) = self.timer.take() else {
            return;
        };
        self.dom.cancel(timer);
        for item in self.items.iter() {
            self.dom.remove(&item.shim);
        }
        tracing::debug!("sticky stopped");
    }
}

impl<D: Dom> Drop for StickyHandle<D> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<D: Dom> fmt::Debug for StickyHandle<D> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("StickyHandle")
            .field("elements", &self.items.len())
            .field("timer", &self.timer)
            .finish()
    }
}

/// Start sticky tracking under `root`, owned by the returned binding.
pub fn bind<D: Dom>(ctx: &PatternContext<D>, root: Option<&D::Node>) -> Binding {
    let mut binding = Binding::new(Pattern::Sticky);
    let handle = StickyHandle::start(ctx, root);
    if !handle.is_empty() {
        binding.on_release(move || drop(handle));
    }
    binding
}
