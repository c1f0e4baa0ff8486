//! Assertions over class and attribute state.

use calcite_dom::{Dom, MemoryDom, NodeId, has_class};

/// Class the stock stylesheet uses for open widgets.
pub const ACTIVE: &str = "is-active";

/// Whether `node` carries the active class.
#[must_use]
pub fn is_active(dom: &MemoryDom, node: NodeId) -> bool {
    has_class(dom, &node, ACTIVE)
}

/// Indices of the nodes carrying the active class.
#[must_use]
pub fn active_indices(dom: &MemoryDom, nodes: &[NodeId]) -> Vec<usize> {
    nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| is_active(dom, **node))
        .map(|(index, _)| index)
        .collect()
}

/// Attribute value as an owned string, for terse `assert_eq!`s.
#[must_use]
pub fn attr(dom: &MemoryDom, node: NodeId, name: &str) -> Option<String> {
    dom.attribute(&node, name)
}

/// Whether `aria-hidden="true"` is set.
#[must_use]
pub fn is_aria_hidden(dom: &MemoryDom, node: NodeId) -> bool {
    attr(dom, node, "aria-hidden").as_deref() == Some("true")
}
