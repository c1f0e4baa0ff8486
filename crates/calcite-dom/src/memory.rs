//! Arena-backed document for native builds and tests.
//!
//! # Design
//! - Nodes live in a `Vec` and are addressed by [`NodeId`]; nothing is ever
//!   freed, detached nodes simply lose their parent link.
//! - Events bubble from the target through its ancestors to the document,
//!   honouring `stop_propagation`. Handlers are cloned out of the store before
//!   they run, so they may freely mutate the tree or the listener set.
//! - Timers run on a manual clock advanced with [`MemoryDom::advance`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use crate::backend::{Dom, Handler, ListenerId, Target, Tick, TimerId};
use crate::event::{DomEvent, EventKind};
use crate::selector::Selector;

/// Handle to an element of a [`MemoryDom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    value: String,
    offset_top: f64,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            parent: None,
            children: Vec::new(),
            attrs: BTreeMap::new(),
            style: BTreeMap::new(),
            value: String::new(),
            offset_top: 0.0,
        }
    }
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    active: Option<NodeId>,
    scroll_offset: f64,
}

impl Tree {
    fn new() -> Self {
        let mut tree = Self {
            nodes: vec![Node::new("html")],
            root: NodeId(0),
            body: NodeId(0),
            active: None,
            scroll_offset: 0.0,
        };
        let body = tree.create("body");
        tree.append(tree.root, body);
        tree.body = body;
        tree
    }

    fn create(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(tag));
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|child| *child != id);
        }
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            current = parent;
        }
        current == self.root
    }

    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(scope).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        let mut copy = self.node(id).clone();
        copy.parent = None;
        copy.children = Vec::new();
        let children = self.node(id).children.clone();
        let new_id = NodeId(self.nodes.len());
        self.nodes.push(copy);
        for child in children {
            let child_copy = self.clone_subtree(child);
            self.append(new_id, child_copy);
        }
        new_id
    }
}

struct Listener {
    target: Target<NodeId>,
    kind: EventKind,
    handler: Handler<NodeId>,
}

#[derive(Default)]
struct ListenerStore {
    next: ListenerId,
    entries: BTreeMap<ListenerId, Listener>,
}

struct Timer {
    period_ms: u64,
    due_ms: u64,
    tick: Tick,
}

#[derive(Default)]
struct Clock {
    now_ms: u64,
    next: TimerId,
    timers: BTreeMap<TimerId, Timer>,
}

struct Inner {
    tree: RefCell<Tree>,
    listeners: RefCell<ListenerStore>,
    clock: RefCell<Clock>,
}

/// In-memory document with event dispatch, focus tracking and a manual clock.
#[derive(Clone)]
pub struct MemoryDom {
    inner: Rc<Inner>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Empty document holding `<html><body></body></html>`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                tree: RefCell::new(Tree::new()),
                listeners: RefCell::new(ListenerStore::default()),
                clock: RefCell::new(Clock::default()),
            }),
        }
    }

    /// The `<html>` element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.inner.tree.borrow().root
    }

    /// The `<body>` element.
    #[must_use]
    pub fn body_element(&self) -> NodeId {
        self.inner.tree.borrow().body
    }

    /// Create a detached element.
    #[must_use]
    pub fn create_element(&self, tag: &str) -> NodeId {
        self.inner.tree.borrow_mut().create(tag)
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append(&self, parent: NodeId, child: NodeId) {
        self.inner.tree.borrow_mut().append(parent, child);
    }

    /// Create an element with `class` and append it to `parent`.
    pub fn append_element(&self, parent: NodeId, tag: &str, class: &str) -> NodeId {
        let mut tree = self.inner.tree.borrow_mut();
        let id = tree.create(tag);
        if !class.is_empty() {
            tree.node_mut(id)
                .attrs
                .insert("class".to_string(), class.to_string());
        }
        tree.append(parent, id);
        id
    }

    /// Tag name of `node`.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> String {
        self.inner.tree.borrow().node(node).tag.clone()
    }

    /// Inline style property, if set.
    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.inner
            .tree
            .borrow()
            .node(node)
            .style
            .get(property)
            .cloned()
    }

    /// Current form-control value.
    #[must_use]
    pub fn value(&self, node: NodeId) -> String {
        self.inner.tree.borrow().node(node).value.clone()
    }

    /// Set the layout offset reported by [`Dom::offset_top`].
    pub fn set_offset_top(&self, node: NodeId, offset: f64) {
        self.inner.tree.borrow_mut().node_mut(node).offset_top = offset;
    }

    /// Scroll the viewport to `offset`.
    pub fn scroll_to(&self, offset: f64) {
        self.inner.tree.borrow_mut().scroll_offset = offset;
    }

    /// Whether `node` is reachable from the document root.
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.inner.tree.borrow().is_attached(node)
    }

    /// Element holding focus.
    #[must_use]
    pub fn active_element(&self) -> Option<NodeId> {
        self.inner.tree.borrow().active
    }

    /// Remove focus from the active element, firing `focusout`.
    pub fn blur(&self) {
        let previous = self.inner.tree.borrow_mut().active.take();
        if let Some(previous) = previous {
            self.dispatch(Some(previous), EventKind::FocusOut, None);
        }
    }

    /// Click `node`. Returns `false` when a handler prevented the default.
    pub fn click(&self, node: NodeId) -> bool {
        self.dispatch(Some(node), EventKind::Click, None)
    }

    /// Release `key` on the focused element (or the body when nothing has
    /// focus). Returns `false` when a handler prevented the default.
    pub fn press_key(&self, key: &str) -> bool {
        let target = {
            let tree = self.inner.tree.borrow();
            tree.active.unwrap_or(tree.body)
        };
        self.key_up(target, key)
    }

    /// Release `key` on `node`.
    pub fn key_up(&self, node: NodeId, key: &str) -> bool {
        self.dispatch(Some(node), EventKind::KeyUp, Some(key))
    }

    /// Number of installed listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().entries.len()
    }

    /// Number of installed listeners attached to the document itself.
    #[must_use]
    pub fn document_listener_count(&self) -> usize {
        self.inner
            .listeners
            .borrow()
            .entries
            .values()
            .filter(|listener| listener.target == Target::Document)
            .count()
    }

    /// Number of installed listeners attached to `node`.
    #[must_use]
    pub fn node_listener_count(&self, node: NodeId) -> usize {
        self.inner
            .listeners
            .borrow()
            .entries
            .values()
            .filter(|listener| listener.target == Target::Node(node))
            .count()
    }

    /// Number of live timers.
    #[must_use]
    pub fn timer_count(&self) -> usize {
        self.inner.clock.borrow().timers.len()
    }

    /// Advance the manual clock, running every timer that falls due in order.
    pub fn advance(&self, by: Duration) {
        let end = {
            let clock = self.inner.clock.borrow();
            clock.now_ms.saturating_add(millis(by))
        };
        loop {
            let due = {
                let mut clock = self.inner.clock.borrow_mut();
                let next = clock
                    .timers
                    .iter()
                    .filter(|(_, timer)| timer.due_ms <= end)
                    .min_by_key(|(id, timer)| (timer.due_ms, **id))
                    .map(|(id, _)| *id);
                next.and_then(|id| {
                    let timer = clock.timers.get_mut(&id)?;
                    let fired_at = timer.due_ms;
                    timer.due_ms = timer.due_ms.saturating_add(timer.period_ms);
                    let tick = Rc::clone(&timer.tick);
                    clock.now_ms = fired_at;
                    Some(tick)
                })
            };
            match due {
                Some(tick) => tick(),
                None => break,
            }
        }
        self.inner.clock.borrow_mut().now_ms = end;
    }

    fn dispatch(&self, target: Option<NodeId>, kind: EventKind, key: Option<&str>) -> bool {
        let mut event = DomEvent::new(kind, target);
        if let Some(key) = key {
            event = event.with_key(key);
        }

        let path = {
            let tree = self.inner.tree.borrow();
            let mut path = Vec::new();
            let mut current = target;
            while let Some(id) = current {
                path.push(Target::Node(id));
                current = tree.node(id).parent;
            }
            if target.is_none_or(|id| tree.is_attached(id)) {
                path.push(Target::Document);
            }
            path
        };

        for step in path {
            let handlers: Vec<(ListenerId, Handler<NodeId>)> = self
                .inner
                .listeners
                .borrow()
                .entries
                .iter()
                .filter(|(_, listener)| listener.kind == kind && listener.target == step)
                .map(|(id, listener)| (*id, Rc::clone(&listener.handler)))
                .collect();
            for (id, handler) in handlers {
                let still_installed = self.inner.listeners.borrow().entries.contains_key(&id);
                if still_installed {
                    handler(&event);
                }
            }
            if event.propagation_stopped() {
                break;
            }
        }

        !event.default_prevented()
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn body(&self) -> Option<NodeId> {
        Some(self.body_element())
    }

    fn query_all(&self, scope: Option<&NodeId>, selector: &Selector) -> Vec<NodeId> {
        let tree = self.inner.tree.borrow();
        let scope = scope.copied().unwrap_or(tree.root);
        tree.descendants(scope)
            .into_iter()
            .filter(|id| {
                let node = tree.node(*id);
                let class_name = node.attrs.get("class").map_or("", String::as_str);
                selector.matches(class_name, |name| node.attrs.get(name).cloned())
            })
            .collect()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.inner.tree.borrow().node(*node).parent
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.inner.tree.borrow().node(*node).children.clone()
    }

    fn class_name(&self, node: &NodeId) -> String {
        self.attribute(node, "class").unwrap_or_default()
    }

    fn set_class_name(&self, node: &NodeId, value: &str) {
        if value.is_empty() {
            self.remove_attribute(node, "class");
        } else {
            self.set_attribute(node, "class", value);
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.inner.tree.borrow().node(*node).attrs.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.inner
            .tree
            .borrow_mut()
            .node_mut(*node)
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        self.inner
            .tree
            .borrow_mut()
            .node_mut(*node)
            .attrs
            .remove(name);
    }

    fn set_style(&self, node: &NodeId, property: &str, value: Option<&str>) {
        let mut tree = self.inner.tree.borrow_mut();
        let style = &mut tree.node_mut(*node).style;
        match value {
            Some(value) if !value.is_empty() => {
                style.insert(property.to_string(), value.to_string());
            }
            _ => {
                style.remove(property);
            }
        }
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        self.inner.tree.borrow_mut().node_mut(*node).value = value.to_string();
    }

    fn focus(&self, node: &NodeId) {
        let previous = {
            let mut tree = self.inner.tree.borrow_mut();
            if tree.active == Some(*node) {
                return;
            }
            tree.active.replace(*node)
        };
        if let Some(previous) = previous {
            self.dispatch(Some(previous), EventKind::FocusOut, None);
        }
        self.dispatch(Some(*node), EventKind::FocusIn, None);
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.inner.tree.borrow().node(*node).offset_top
    }

    fn scroll_offset(&self) -> f64 {
        self.inner.tree.borrow().scroll_offset
    }

    fn clone_deep(&self, node: &NodeId) -> Option<NodeId> {
        Some(self.inner.tree.borrow_mut().clone_subtree(*node))
    }

    fn insert_before(&self, parent: &NodeId, node: &NodeId, reference: &NodeId) {
        let mut tree = self.inner.tree.borrow_mut();
        tree.detach(*node);
        let index = tree
            .node(*parent)
            .children
            .iter()
            .position(|child| child == reference);
        let siblings = &mut tree.node_mut(*parent).children;
        match index {
            Some(index) => siblings.insert(index, *node),
            None => siblings.push(*node),
        }
        tree.node_mut(*node).parent = Some(*parent);
    }

    fn remove(&self, node: &NodeId) {
        let mut tree = self.inner.tree.borrow_mut();
        tree.detach(*node);
        if tree.active.is_some_and(|active| !tree.is_attached(active)) {
            tree.active = None;
        }
    }

    fn listen(
        &self,
        target: &Target<NodeId>,
        kind: EventKind,
        handler: Handler<NodeId>,
    ) -> ListenerId {
        let mut store = self.inner.listeners.borrow_mut();
        store.next += 1;
        let id = store.next;
        store.entries.insert(
            id,
            Listener {
                target: target.clone(),
                kind,
                handler,
            },
        );
        id
    }

    fn unlisten(&self, id: ListenerId) {
        self.inner.listeners.borrow_mut().entries.remove(&id);
    }

    fn every(&self, period: Duration, tick: Tick) -> TimerId {
        let mut clock = self.inner.clock.borrow_mut();
        clock.next += 1;
        let id = clock.next;
        let period_ms = millis(period).max(1);
        let due_ms = clock.now_ms.saturating_add(period_ms);
        clock.timers.insert(
            id,
            Timer {
                period_ms,
                due_ms,
                tick,
            },
        );
        id
    }

    fn cancel(&self, id: TimerId) {
        self.inner.clock.borrow_mut().timers.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::event::add_event;

    #[test]
    fn query_all_is_document_ordered_and_excludes_scope() {
        let dom = MemoryDom::new();
        let body = dom.body_element();
        let first = dom.append_element(body, "div", "js-tab-group");
        let nested = dom.append_element(first, "div", "js-tab-group");
        let second = dom.append_element(body, "div", "js-tab-group");

        let all = dom.query_all(None, &Selector::class("js-tab-group"));
        assert_eq!(all, vec![first, nested, second]);

        let scoped = dom.query_all(Some(&first), &Selector::class("js-tab-group"));
        assert_eq!(scoped, vec![nested]);
    }

    #[test]
    fn events_bubble_to_document_until_stopped() {
        let dom = MemoryDom::new();
        let outer = dom.append_element(dom.body_element(), "div", "outer");
        let inner = dom.append_element(outer, "button", "inner");
        let hits = Rc::new(Cell::new(0));

        let counter = Rc::clone(&hits);
        add_event(&dom, &Target::Document, EventKind::Click, move |_| {
            counter.set(counter.get() + 1);
        });
        assert!(dom.click(inner));
        assert_eq!(hits.get(), 1);

        add_event(&dom, &Target::Node(outer), EventKind::Click, |event| {
            event.stop_propagation();
            event.prevent_default();
        });
        assert!(!dom.click(inner));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn listener_removed_mid_dispatch_is_skipped() {
        let dom = MemoryDom::new();
        let node = dom.append_element(dom.body_element(), "div", "");
        let hits = Rc::new(Cell::new(0));

        let second_id = Rc::new(Cell::new(0));
        let remover = {
            let dom = dom.clone();
            let second_id = Rc::clone(&second_id);
            move |_: &DomEvent<NodeId>| dom.unlisten(second_id.get())
        };
        add_event(&dom, &Target::Node(node), EventKind::Click, remover);
        let counter = Rc::clone(&hits);
        second_id.set(add_event(
            &dom,
            &Target::Node(node),
            EventKind::Click,
            move |_| counter.set(counter.get() + 1),
        ));

        dom.click(node);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn focus_fires_focusout_then_focusin() {
        let dom = MemoryDom::new();
        let first = dom.append_element(dom.body_element(), "input", "");
        let second = dom.append_element(dom.body_element(), "input", "");
        let log = Rc::new(RefCell::new(Vec::new()));

        for kind in [EventKind::FocusIn, EventKind::FocusOut] {
            let log = Rc::clone(&log);
            add_event(&dom, &Target::Document, kind, move |event| {
                log.borrow_mut().push((event.kind(), event.target().copied()));
            });
        }

        dom.focus(&first);
        dom.focus(&second);
        dom.focus(&second);
        dom.blur();

        assert_eq!(
            *log.borrow(),
            vec![
                (EventKind::FocusIn, Some(first)),
                (EventKind::FocusOut, Some(first)),
                (EventKind::FocusIn, Some(second)),
                (EventKind::FocusOut, Some(second)),
            ]
        );
        assert_eq!(dom.active_element(), None);
    }

    #[test]
    fn clone_and_insert_before_place_copy_ahead_of_source() {
        let dom = MemoryDom::new();
        let body = dom.body_element();
        let header = dom.append_element(body, "header", "js-sticky");
        dom.append_element(header, "span", "title");

        let shim = dom.clone_deep(&header).expect("clone");
        assert!(!dom.is_attached(shim));
        dom.insert_before(&body, &shim, &header);

        assert_eq!(dom.children(&body), vec![shim, header]);
        assert_eq!(dom.children(&shim).len(), 1);
        assert_eq!(dom.class_name(&shim), "js-sticky");

        dom.remove(&shim);
        assert_eq!(dom.children(&body), vec![header]);
    }

    #[test]
    fn timers_fire_per_period_until_cancelled() {
        let dom = MemoryDom::new();
        let ticks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&ticks);
        let id = dom.every(
            Duration::from_millis(10),
            Rc::new(move || counter.set(counter.get() + 1)),
        );

        dom.advance(Duration::from_millis(9));
        assert_eq!(ticks.get(), 0);
        dom.advance(Duration::from_millis(25));
        assert_eq!(ticks.get(), 3);

        dom.cancel(id);
        dom.advance(Duration::from_millis(100));
        assert_eq!(ticks.get(), 3);
        assert_eq!(dom.timer_count(), 0);
    }
}
