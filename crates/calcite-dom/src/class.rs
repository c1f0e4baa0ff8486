//! Class token manipulation.
//!
//! The string helpers operate on a raw `class` attribute value; the node
//! helpers read and write it through a [`Dom`] backend. Class lists are space
//! separated, and every helper accepts several classes in one call.

use crate::backend::Dom;

/// Whether the class attribute `class_name` contains the token `class`.
#[must_use]
pub fn has_class_token(class_name: &str, class: &str) -> bool {
    class_name.split_whitespace().any(|token| token == class)
}

/// `class_name` with every token of `classes` appended unless already present.
#[must_use]
pub fn with_classes(class_name: &str, classes: &str) -> String {
    let mut next = class_name.trim().to_string();
    for class in classes.split_whitespace() {
        if !has_class_token(&next, class) {
            if !next.is_empty() {
                next.push(' ');
            }
            next.push_str(class);
        }
    }
    next
}

/// `class_name` with every token of `classes` removed.
#[must_use]
pub fn without_classes(class_name: &str, classes: &str) -> String {
    let removed: Vec<&str> = classes.split_whitespace().collect();
    class_name
        .split_whitespace()
        .filter(|token| !removed.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `node` carries `class`.
pub fn has_class<D: Dom>(dom: &D, node: &D::Node, class: &str) -> bool {
    has_class_token(&dom.class_name(node), class)
}

/// Add one or more space separated classes to `node`.
pub fn add_class<D: Dom>(dom: &D, node: &D::Node, classes: &str) {
    let current = dom.class_name(node);
    let next = with_classes(&current, classes);
    if next != current {
        dom.set_class_name(node, &next);
    }
}

/// Remove one or more space separated classes from `node`.
pub fn remove_class<D: Dom>(dom: &D, node: &D::Node, classes: &str) {
    let current = dom.class_name(node);
    let next = without_classes(&current, classes);
    if next != current {
        dom.set_class_name(node, &next);
    }
}

/// Remove `class` when present, add it otherwise. Returns the new membership.
pub fn toggle_class<D: Dom>(dom: &D, node: &D::Node, class: &str) -> bool {
    if has_class(dom, node, class) {
        remove_class(dom, node, class);
        false
    } else {
        add_class(dom, node, class);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_match_is_whole_word() {
        assert!(has_class_token("drawer js-drawer", "drawer"));
        assert!(!has_class_token("js-drawer", "drawer"));
        assert!(!has_class_token("", "drawer"));
    }

    #[test]
    fn add_skips_present_tokens() {
        assert_eq!(with_classes("a b", "b c"), "a b c");
        assert_eq!(with_classes("", "is-active"), "is-active");
        assert_eq!(with_classes("  a ", ""), "a");
    }

    #[test]
    fn remove_drops_every_occurrence() {
        assert_eq!(without_classes("a b a c", "a"), "b c");
        assert_eq!(without_classes("a b c", "a c"), "b");
        assert_eq!(without_classes("a", "z"), "a");
    }
}
