//! Properties of the exclusive active-marker helpers.

use calcite_dom::{MemoryDom, NodeId, add_class, has_class};
use calcite_patterns::{WidgetState, remove_active, toggle_active};
use proptest::prelude::*;

const ACTIVE: &str = "is-active";

fn nodes(dom: &MemoryDom, initial: &[bool]) -> Vec<NodeId> {
    initial
        .iter()
        .map(|active| {
            let node = dom.append_element(dom.body_element(), "li", "item");
            if *active {
                add_class(dom, &node, ACTIVE);
            }
            node
        })
        .collect()
}

proptest! {
    #[test]
    fn toggle_leaves_at_most_the_target_active(
        initial in prop::collection::vec(any::<bool>(), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let dom = MemoryDom::new();
        let list = nodes(&dom, &initial);
        let target = pick.index(list.len());
        let was_active = initial[target];

        let state = toggle_active(&dom, &list, &list[target], ACTIVE);
        let active: Vec<usize> = (0..list.len())
            .filter(|index| has_class(&dom, &list[*index], ACTIVE))
            .collect();

        if was_active {
            prop_assert_eq!(state, WidgetState::Closed);
            prop_assert!(!active.contains(&target));
        } else {
            prop_assert_eq!(state, WidgetState::Open);
            prop_assert_eq!(active, vec![target]);
        }
    }

    #[test]
    fn remove_active_clears_everything(initial in prop::collection::vec(any::<bool>(), 0..8)) {
        let dom = MemoryDom::new();
        let list = nodes(&dom, &initial);
        remove_active(&dom, &list, ACTIVE);
        prop_assert!(list.iter().all(|node| !has_class(&dom, node, ACTIVE)));
    }
}
