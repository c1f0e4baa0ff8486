//! Backend abstraction over a live document.
//!
//! # Design
//! - One trait, one implementation per target, selected with `cfg` at compile
//!   time rather than feature-detected at call time.
//! - Methods are infallible; backends log and swallow host errors so the
//!   patterns see the same "no-op on failure" behaviour everywhere.
//! - Listener and timer registrations are identified by plain ids so callers
//!   can release exactly what they installed.

use std::fmt::Debug;
use std::rc::Rc;
use std::time::Duration;

use crate::event::{DomEvent, EventKind};
use crate::selector::Selector;

/// Identifier of an installed event listener.
pub type ListenerId = u64;

/// Identifier of a recurring timer.
pub type TimerId = u64;

/// Shared event callback.
pub type Handler<N> = Rc<dyn Fn(&DomEvent<N>)>;

/// Shared timer callback.
pub type Tick = Rc<dyn Fn()>;

/// Where a listener is attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target<N> {
    /// The document itself; receives every bubbling event.
    Document,
    /// A specific element.
    Node(N),
}

/// Operations the widget patterns need from a document.
pub trait Dom: Clone + 'static {
    /// Element handle. Equality must be identity.
    type Node: Clone + PartialEq + Debug + 'static;

    /// The `<body>` element, when the document has one.
    fn body(&self) -> Option<Self::Node>;

    /// All elements under `scope` (the whole document when `None`) matching
    /// `selector`, in document order. The scope itself is never included.
    fn query_all(&self, scope: Option<&Self::Node>, selector: &Selector) -> Vec<Self::Node>;

    /// First element in the document matching `selector`.
    fn query(&self, selector: &Selector) -> Option<Self::Node> {
        self.query_all(None, selector).into_iter().next()
    }

    /// Parent element, `None` at the top of the tree or for detached nodes.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Element children in order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Raw `class` attribute value.
    fn class_name(&self, node: &Self::Node) -> String;

    /// Replace the `class` attribute value.
    fn set_class_name(&self, node: &Self::Node, value: &str);

    /// Attribute value, if present.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Set an attribute value.
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    /// Remove an attribute.
    fn remove_attribute(&self, node: &Self::Node, name: &str);

    /// Set an inline style property, or clear it when `value` is `None`.
    fn set_style(&self, node: &Self::Node, property: &str, value: Option<&str>);

    /// Replace the value of a form control. Ignored for other elements.
    fn set_value(&self, node: &Self::Node, value: &str);

    /// Move focus to `node`, firing `focusout`/`focusin`.
    fn focus(&self, node: &Self::Node);

    /// Distance in pixels from the top of the offset parent.
    fn offset_top(&self, node: &Self::Node) -> f64;

    /// Current vertical scroll offset of the viewport.
    fn scroll_offset(&self) -> f64;

    /// Deep copy of `node`, detached from the tree.
    fn clone_deep(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Insert `node` into `parent` immediately before `reference`.
    fn insert_before(&self, parent: &Self::Node, node: &Self::Node, reference: &Self::Node);

    /// Detach `node` from its parent.
    fn remove(&self, node: &Self::Node);

    /// Attach `handler` to `kind` events reaching `target`.
    fn listen(
        &self,
        target: &Target<Self::Node>,
        kind: EventKind,
        handler: Handler<Self::Node>,
    ) -> ListenerId;

    /// Detach a listener. Unknown ids are ignored.
    fn unlisten(&self, id: ListenerId);

    /// Run `tick` every `period` until cancelled.
    fn every(&self, period: Duration, tick: Tick) -> TimerId;

    /// Cancel a recurring timer. Unknown ids are ignored.
    fn cancel(&self, id: TimerId);
}
