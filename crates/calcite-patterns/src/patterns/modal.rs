//! Modal dialogs opened by `data-modal` toggles.
//!
//! A toggle without `data-modal` closes the modal it sits in. Clicks inside a
//! modal never bubble past it; a click landing on the modal element itself
//! (the dimmed backdrop) closes it.

use calcite_dom::Dom;

use super::overlay::{self, Backdrop, OverlayKind};
use crate::binding::Binding;
use crate::context::PatternContext;
use crate::pattern::Pattern;

static MODAL: OverlayKind = OverlayKind {
    pattern: Pattern::Modal,
    overlay_class: "js-modal",
    toggle_class: "js-modal-toggle",
    id_attribute: "data-modal",
    enclosing_fallback: true,
    contain_clicks: true,
    backdrop: Backdrop::OverlayItself,
};

/// Bind every `.js-modal-toggle` and `.js-modal` under `root`.
pub fn bind<D: Dom>(ctx: &PatternContext<D>, root: Option<&D::Node>) -> Binding {
    overlay::bind(ctx, root, &MODAL)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use calcite_dom::{EventKind, KEY_ESCAPE, MemoryDom, NodeId, Target, add_event, has_class};

    use super::*;
    use crate::config::CalciteConfig;

    struct Fixture {
        dom: MemoryDom,
        wrapper: NodeId,
        toggle: NodeId,
        modal: NodeId,
        input: NodeId,
        close: NodeId,
    }

    fn fixture() -> Fixture {
        let dom = MemoryDom::new();
        let body = dom.body_element();
        let wrapper = dom.append_element(body, "div", "wrapper");
        dom.append_element(body, "footer", "footer");
        let toggle = dom.append_element(wrapper, "button", "btn js-modal-toggle");
        dom.set_attribute(&toggle, "data-modal", "signin");
        let modal = dom.append_element(body, "div", "modal-overlay js-modal");
        dom.set_attribute(&modal, "data-modal", "signin");
        let content = dom.append_element(modal, "div", "modal-content");
        let input = dom.append_element(content, "input", "");
        let close = dom.append_element(content, "button", "js-modal-toggle");
        Fixture {
            dom,
            wrapper,
            toggle,
            modal,
            input,
            close,
        }
    }

    fn bound(fx: &Fixture) -> Binding {
        bind(&PatternContext::new(fx.dom.clone(), CalciteConfig::default()), None)
    }

    #[test]
    fn open_then_id_less_close_button() {
        let fx = fixture();
        let _binding = bound(&fx);

        fx.dom.click(fx.toggle);
        assert!(has_class(&fx.dom, &fx.modal, "is-active"));
        assert_eq!(fx.dom.attribute(&fx.wrapper, "aria-hidden").as_deref(), Some("true"));
        assert_eq!(fx.dom.active_element(), Some(fx.modal));

        fx.dom.click(fx.close);
        assert!(!has_class(&fx.dom, &fx.modal, "is-active"));
        assert_eq!(fx.dom.attribute(&fx.wrapper, "aria-hidden"), None);
        assert_eq!(fx.dom.active_element(), Some(fx.toggle));
        assert_eq!(fx.dom.document_listener_count(), 0);
    }

    #[test]
    fn backdrop_closes_and_inner_clicks_stay_contained() {
        let fx = fixture();
        let _binding = bound(&fx);
        let reached_document = Rc::new(Cell::new(0));
        let counter = Rc::clone(&reached_document);
        add_event(&fx.dom, &Target::Document, EventKind::Click, move |_| {
            counter.set(counter.get() + 1);
        });

        fx.dom.click(fx.toggle);
        let before = reached_document.get();
        fx.dom.click(fx.input);
        assert_eq!(reached_document.get(), before);
        assert!(has_class(&fx.dom, &fx.modal, "is-active"));

        fx.dom.click(fx.modal);
        assert!(!has_class(&fx.dom, &fx.modal, "is-active"));
        assert_eq!(fx.dom.active_element(), Some(fx.toggle));
        assert_eq!(fx.dom.attribute(&fx.wrapper, "aria-hidden"), None);
    }

    #[test]
    fn escape_closes_modal() {
        let fx = fixture();
        let _binding = bound(&fx);

        fx.dom.click(fx.toggle);
        fx.dom.focus(&fx.input);
        fx.dom.press_key(KEY_ESCAPE);
        assert!(!has_class(&fx.dom, &fx.modal, "is-active"));
        assert_eq!(fx.dom.attribute(&fx.modal, "tabindex"), None);
        assert_eq!(fx.dom.active_element(), Some(fx.toggle));
        assert_eq!(fx.dom.document_listener_count(), 0);
    }
}
