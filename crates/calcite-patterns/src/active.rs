//! Active-marker helpers shared by the controllers.

use calcite_dom::{Dom, add_class, has_class, remove_class};

const ARIA_HIDDEN: &str = "aria-hidden";

/// Two-state widget lifecycle, read from and written to the active class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetState {
    /// Collapsed, hidden or deselected.
    Closed,
    /// Expanded, shown or selected.
    Open,
}

impl WidgetState {
    /// Current state of `node`.
    pub fn read<D: Dom>(dom: &D, node: &D::Node, active_class: &str) -> Self {
        if has_class(dom, node, active_class) {
            Self::Open
        } else {
            Self::Closed
        }
    }

    /// The other state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    /// Whether the widget is open.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// `aria-expanded` value mirroring the state.
    #[must_use]
    pub const fn aria_expanded(self) -> &'static str {
        match self {
            Self::Closed => "false",
            Self::Open => "true",
        }
    }

    /// Write the state onto `node`'s class list.
    pub fn apply<D: Dom>(self, dom: &D, node: &D::Node, active_class: &str) {
        match self {
            Self::Closed => remove_class(dom, node, active_class),
            Self::Open => add_class(dom, node, active_class),
        }
    }
}

/// Strip the active class from every node.
pub fn remove_active<D: Dom>(dom: &D, nodes: &[D::Node], active_class: &str) {
    for node in nodes {
        remove_class(dom, node, active_class);
    }
}

/// Close `target` when it is open; otherwise close every node and open
/// `target`. Returns the new state of `target`.
pub fn toggle_active<D: Dom>(
    dom: &D,
    nodes: &[D::Node],
    target: &D::Node,
    active_class: &str,
) -> WidgetState {
    if WidgetState::read(dom, target, active_class).is_open() {
        remove_class(dom, target, active_class);
        WidgetState::Closed
    } else {
        remove_active(dom, nodes, active_class);
        add_class(dom, target, active_class);
        WidgetState::Open
    }
}

/// Flip `aria-hidden="true"` on each node.
pub fn toggle_aria_hidden<D: Dom>(dom: &D, nodes: &[D::Node]) {
    for node in nodes {
        if dom.attribute(node, ARIA_HIDDEN).as_deref() == Some("true") {
            dom.remove_attribute(node, ARIA_HIDDEN);
        } else {
            dom.set_attribute(node, ARIA_HIDDEN, "true");
        }
    }
}

/// Set or clear `aria-hidden="true"` on each node.
pub fn set_aria_hidden<D: Dom>(dom: &D, nodes: &[D::Node], hidden: bool) {
    for node in nodes {
        if hidden {
            dom.set_attribute(node, ARIA_HIDDEN, "true");
        } else {
            dom.remove_attribute(node, ARIA_HIDDEN);
        }
    }
}

#[cfg(test)]
mod tests {
    use calcite_dom::{MemoryDom, NodeId};

    use super::*;

    const ACTIVE: &str = "is-active";

    fn siblings(dom: &MemoryDom, count: usize) -> Vec<NodeId> {
        (0..count)
            .map(|_| dom.append_element(dom.body_element(), "li", "item"))
            .collect()
    }

    fn active_count(dom: &MemoryDom, nodes: &[NodeId]) -> usize {
        nodes
            .iter()
            .filter(|node| has_class(dom, *node, ACTIVE))
            .count()
    }

    #[test]
    fn toggle_active_is_exclusive() {
        let dom = MemoryDom::new();
        let nodes = siblings(&dom, 3);
        add_class(&dom, &nodes[0], ACTIVE);

        assert_eq!(
            toggle_active(&dom, &nodes, &nodes[2], ACTIVE),
            WidgetState::Open
        );
        assert_eq!(active_count(&dom, &nodes), 1);
        assert!(has_class(&dom, &nodes[2], ACTIVE));

        assert_eq!(
            toggle_active(&dom, &nodes, &nodes[2], ACTIVE),
            WidgetState::Closed
        );
        assert_eq!(active_count(&dom, &nodes), 0);
    }

    #[test]
    fn aria_hidden_toggle_and_set() {
        let dom = MemoryDom::new();
        let nodes = siblings(&dom, 2);

        toggle_aria_hidden(&dom, &nodes);
        assert!(
            nodes
                .iter()
                .all(|node| dom.attribute(node, "aria-hidden").as_deref() == Some("true"))
        );
        toggle_aria_hidden(&dom, &nodes);
        assert!(nodes.iter().all(|node| dom.attribute(node, "aria-hidden").is_none()));

        set_aria_hidden(&dom, &nodes, true);
        set_aria_hidden(&dom, &nodes, true);
        assert!(
            nodes
                .iter()
                .all(|node| dom.attribute(node, "aria-hidden").as_deref() == Some("true"))
        );
        set_aria_hidden(&dom, &nodes, false);
        assert!(nodes.iter().all(|node| dom.attribute(node, "aria-hidden").is_none()));
    }

    #[test]
    fn widget_state_round_trips_through_class() {
        let dom = MemoryDom::new();
        let node = dom.append_element(dom.body_element(), "section", "accordion-section");

        let state = WidgetState::read(&dom, &node, ACTIVE);
        assert_eq!(state, WidgetState::Closed);
        assert_eq!(state.aria_expanded(), "false");

        state.toggled().apply(&dom, &node, ACTIVE);
        assert_eq!(WidgetState::read(&dom, &node, ACTIVE), WidgetState::Open);
        assert_eq!(WidgetState::Open.aria_expanded(), "true");
    }
}
