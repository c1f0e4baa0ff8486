//! Tree walking helpers.

use crate::backend::Dom;
use crate::class::has_class;

/// Closest element carrying `class`, starting at `node` itself and walking up
/// through its ancestors. `None` once the top of the tree is passed.
pub fn closest<D: Dom>(dom: &D, class: &str, node: &D::Node) -> Option<D::Node> {
    let mut current = Some(node.clone());
    while let Some(candidate) = current {
        if has_class(dom, &candidate, class) {
            return Some(candidate);
        }
        current = dom.parent(&candidate);
    }
    None
}

/// Collect a node list into an owned vector.
pub fn node_list_to_array<I>(list: I) -> Vec<I::Item>
where
    I: IntoIterator,
{
    list.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDom;

    #[test]
    fn closest_includes_self_and_ancestors() {
        let dom = MemoryDom::new();
        let outer = dom.append_element(dom.body_element(), "div", "js-drawer drawer");
        let inner = dom.append_element(outer, "nav", "drawer-nav");
        let leaf = dom.append_element(inner, "a", "link");

        assert_eq!(closest(&dom, "js-drawer", &leaf), Some(outer));
        assert_eq!(closest(&dom, "link", &leaf), Some(leaf));
        assert_eq!(closest(&dom, "js-modal", &leaf), None);
    }

    #[test]
    fn node_list_preserves_order() {
        assert_eq!(node_list_to_array([3, 1, 2]), vec![3, 1, 2]);
    }
}
