//! `web-sys` backend for wasm32 builds.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use gloo::events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Interval;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, KeyboardEvent, NodeList, Window};

use crate::backend::{Dom, Handler, ListenerId, Target, Tick, TimerId};
use crate::event::{DomEvent, EventKind};
use crate::selector::Selector;
use crate::traverse;

/// Live browser document.
#[derive(Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
    listeners: Rc<RefCell<HashMap<ListenerId, EventListener>>>,
    timers: Rc<RefCell<HashMap<TimerId, Interval>>>,
    next_id: Rc<Cell<u64>>,
}

impl WebDom {
    /// Bind to the global window, if one exists.
    #[must_use]
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self::from_parts(window, document))
    }

    /// Bind to an explicit window/document pair.
    #[must_use]
    pub fn from_parts(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            listeners: Rc::new(RefCell::new(HashMap::new())),
            timers: Rc::new(RefCell::new(HashMap::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// Underlying document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    fn allocate_id(&self) -> u64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

/// Collect a `NodeList` into its element members.
#[must_use]
pub fn node_list_to_array(list: &NodeList) -> Vec<Element> {
    traverse::node_list_to_array(
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok()),
    )
}

fn log_js_error<T>(operation: &'static str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(operation, error = ?err, "dom operation failed");
            None
        }
    }
}

fn wrap_event(kind: EventKind, event: &web_sys::Event) -> DomEvent<Element> {
    let target = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    let wrapped = DomEvent::new(kind, target);
    match event.dyn_ref::<KeyboardEvent>() {
        Some(keyboard) => wrapped.with_key(keyboard.key()),
        None => wrapped,
    }
}

fn settle(wrapped: &DomEvent<Element>, event: &web_sys::Event) {
    if wrapped.default_prevented() {
        event.prevent_default();
    }
    if wrapped.propagation_stopped() {
        event.stop_propagation();
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn body(&self) -> Option<Element> {
        self.document.body().map(Into::into)
    }

    fn query_all(&self, scope: Option<&Element>, selector: &Selector) -> Vec<Element> {
        let css = selector.to_css();
        let list = match scope {
            Some(scope) => scope.query_selector_all(&css),
            None => self.document.query_selector_all(&css),
        };
        log_js_error("query_selector_all", list)
            .map(|list| node_list_to_array(&list))
            .unwrap_or_default()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let collection = node.children();
        traverse::node_list_to_array((0..collection.length()).filter_map(|i| collection.item(i)))
    }

    fn class_name(&self, node: &Element) -> String {
        node.class_name()
    }

    fn set_class_name(&self, node: &Element, value: &str) {
        node.set_class_name(value);
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        log_js_error("set_attribute", node.set_attribute(name, value));
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        log_js_error("remove_attribute", node.remove_attribute(name));
    }

    fn set_style(&self, node: &Element, property: &str, value: Option<&str>) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = element.style();
        match value {
            Some(value) => {
                log_js_error("style.set_property", style.set_property(property, value));
            }
            None => {
                log_js_error("style.remove_property", style.remove_property(property));
            }
        }
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }

    fn focus(&self, node: &Element) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            log_js_error("focus", element.focus());
        }
    }

    fn offset_top(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map_or(0.0, |element| f64::from(element.offset_top()))
    }

    fn scroll_offset(&self) -> f64 {
        log_js_error("scroll_y", self.window.scroll_y()).unwrap_or(0.0)
    }

    fn clone_deep(&self, node: &Element) -> Option<Element> {
        log_js_error("clone_node", node.clone_node_with_deep(true))
            .and_then(|copy| copy.dyn_into::<Element>().ok())
    }

    fn insert_before(&self, parent: &Element, node: &Element, reference: &Element) {
        log_js_error("insert_before", parent.insert_before(node, Some(reference)));
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn listen(
        &self,
        target: &Target<Element>,
        kind: EventKind,
        handler: Handler<Element>,
    ) -> ListenerId {
        let callback = move |event: &web_sys::Event| {
            let wrapped = wrap_event(kind, event);
            handler(&wrapped);
            settle(&wrapped, event);
        };
        let options = EventListenerOptions::enable_prevent_default();
        let listener = match target {
            Target::Document => {
                EventListener::new_with_options(&self.document, kind.as_str(), options, callback)
            }
            Target::Node(node) => {
                EventListener::new_with_options(node, kind.as_str(), options, callback)
            }
        };
        let id = self.allocate_id();
        self.listeners.borrow_mut().insert(id, listener);
        id
    }

    fn unlisten(&self, id: ListenerId) {
        let removed = self.listeners.borrow_mut().remove(&id);
        drop(removed);
    }

    fn every(&self, period: Duration, tick: Tick) -> TimerId {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX).max(1);
        let interval = Interval::new(millis, move || tick());
        let id = self.allocate_id();
        self.timers.borrow_mut().insert(id, interval);
        id
    }

    fn cancel(&self, id: TimerId) {
        let removed = self.timers.borrow_mut().remove(&id);
        drop(removed);
    }
}
