use calcite_dom::{Dom, MemoryDom, add_class, has_class, remove_class, toggle_class};
use proptest::prelude::*;

fn class_token() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,11}"
}

fn class_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(class_token(), 0..6)
}

proptest! {
    #[test]
    fn add_then_remove_round_trips_membership(initial in class_list(), class in class_token()) {
        let dom = MemoryDom::new();
        let node = dom.append_element(dom.body_element(), "div", &initial.join(" "));

        add_class(&dom, &node, &class);
        prop_assert!(has_class(&dom, &node, &class));
        add_class(&dom, &node, &class);
        prop_assert!(has_class(&dom, &node, &class));

        remove_class(&dom, &node, &class);
        prop_assert!(!has_class(&dom, &node, &class));
        remove_class(&dom, &node, &class);
        prop_assert!(!has_class(&dom, &node, &class));
    }

    #[test]
    fn double_toggle_restores_membership(initial in class_list(), class in class_token()) {
        let dom = MemoryDom::new();
        let node = dom.append_element(dom.body_element(), "div", &initial.join(" "));
        let before = has_class(&dom, &node, &class);

        let after_first = toggle_class(&dom, &node, &class);
        prop_assert_eq!(after_first, !before);
        toggle_class(&dom, &node, &class);
        prop_assert_eq!(has_class(&dom, &node, &class), before);
    }

    #[test]
    fn unrelated_classes_survive(initial in class_list(), class in class_token()) {
        let dom = MemoryDom::new();
        let node = dom.append_element(dom.body_element(), "div", &initial.join(" "));

        add_class(&dom, &node, &class);
        remove_class(&dom, &node, &class);

        for other in initial.iter().filter(|other| **other != class) {
            prop_assert!(has_class(&dom, &node, other));
        }
        prop_assert!(!dom.class_name(&node).starts_with(' '));
    }
}

#[test]
fn multiple_classes_in_one_call() {
    let dom = MemoryDom::new();
    let node = dom.append_element(dom.body_element(), "div", "drawer");

    add_class(&dom, &node, "js-drawer is-active");
    assert_eq!(dom.class_name(&node), "drawer js-drawer is-active");

    remove_class(&dom, &node, "drawer is-active");
    assert_eq!(dom.class_name(&node), "js-drawer");
}
