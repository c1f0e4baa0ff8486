//! Dropdown menus dismissed by clicks anywhere else on the page.

use std::cell::Cell;
use std::rc::Rc;

use calcite_dom::{
    Dom, EventKind, ListenerId, Target, add_class, add_event, closest, remove_class, remove_event,
};

use crate::active::{WidgetState, remove_active};
use crate::binding::Binding;
use crate::context::PatternContext;
use crate::pattern::Pattern;

const DROPDOWN: &str = "js-dropdown";
const TOGGLE: &str = "js-dropdown-toggle";

/// Dropdowns found by one scan plus the document listener that dismisses
/// them. The listener exists only while a menu is open.
struct Menus<D: Dom> {
    ctx: PatternContext<D>,
    dropdowns: Vec<D::Node>,
    dismiss: Cell<Option<ListenerId>>,
}

impl<D: Dom> Menus<D> {
    fn toggle(self: &Rc<Self>, toggle: &D::Node) {
        let dom = self.ctx.dom();
        let Some(dropdown) = closest(dom, DROPDOWN, toggle) else {
            return;
        };
        let was_open = WidgetState::read(dom, &dropdown, self.ctx.active_class()).is_open();
        self.close_all();
        remove_class(dom, &dropdown, self.ctx.active_class());
        if !was_open {
            add_class(dom, &dropdown, self.ctx.active_class());
            self.arm();
        }
        tracing::trace!(open = !was_open, "dropdown toggled");
    }

    fn close_all(&self) {
        self.disarm();
        remove_active(self.ctx.dom(), &self.dropdowns, self.ctx.active_class());
    }

    fn arm(self: &Rc<Self>) {
        if self.dismiss.get().is_some() {
            return;
        }
        let menus = Rc::clone(self);
        let id = add_event(
            self.ctx.dom(),
            &Target::Document,
            EventKind::Click,
            move |_| menus.close_all(),
        );
        self.dismiss.set(Some(id));
    }

    fn disarm(&self) {
        if let Some(id) = self.dismiss.take() {
            remove_event(self.ctx.dom(), id);
        }
    }
}

/// Bind every `.js-dropdown-toggle` under `root`.
pub fn bind<D: Dom>(ctx: &PatternContext<D>, root: Option<&D::Node>) -> Binding {
    let dom = ctx.dom();
    let mut binding = Binding::new(Pattern::Dropdown);
    let toggles = ctx.find(root, TOGGLE);
    if toggles.is_empty() {
        return binding;
    }

    let menus = Rc::new(Menus {
        ctx: ctx.clone(),
        dropdowns: ctx.find(root, DROPDOWN),
        dismiss: Cell::new(None),
    });

    for toggle in toggles {
        let menus = Rc::clone(&menus);
        let bound = toggle.clone();
        binding.listen(dom, &Target::Node(toggle), EventKind::Click, move |event| {
            event.prevent_default();
            event.stop_propagation();
            menus.toggle(&bound);
        });
    }
    binding.on_release(move || menus.disarm());

    tracing::debug!(listeners = binding.listener_count(), "dropdown bound");
    binding
}

#[cfg(test)]
mod tests {
    use calcite_dom::{MemoryDom, NodeId, has_class};

    use super::*;
    use crate::config::CalciteConfig;

    struct Fixture {
        dom: MemoryDom,
        dropdowns: Vec<NodeId>,
        toggles: Vec<NodeId>,
        items: Vec<NodeId>,
        outside: NodeId,
    }

    fn fixture(count: usize) -> Fixture {
        let dom = MemoryDom::new();
        let body = dom.body_element();
        let outside = dom.append_element(body, "p", "copy");
        let mut fixture = Fixture {
            dom: dom.clone(),
            dropdowns: Vec::new(),
            toggles: Vec::new(),
            items: Vec::new(),
            outside,
        };
        for _ in 0..count {
            let dropdown = dom.append_element(body, "div", "dropdown js-dropdown");
            fixture.toggles.push(dom.append_element(dropdown, "a", "js-dropdown-toggle"));
            let menu = dom.append_element(dropdown, "nav", "dropdown-menu");
            fixture.items.push(dom.append_element(menu, "a", "dropdown-link"));
            fixture.dropdowns.push(dropdown);
        }
        fixture
    }

    fn bound(fixture: &Fixture) -> Binding {
        let ctx = PatternContext::new(fixture.dom.clone(), CalciteConfig::default());
        bind(&ctx, None)
    }

    #[test]
    fn toggle_opens_and_installs_one_dismiss_listener() {
        let fx = fixture(1);
        let _binding = bound(&fx);
        assert_eq!(fx.dom.document_listener_count(), 0);

        let default_kept = fx.dom.click(fx.toggles[0]);
        assert!(!default_kept);
        assert!(has_class(&fx.dom, &fx.dropdowns[0], "is-active"));
        assert_eq!(fx.dom.document_listener_count(), 1);

        fx.dom.click(fx.toggles[0]);
        assert!(!has_class(&fx.dom, &fx.dropdowns[0], "is-active"));
        assert_eq!(fx.dom.document_listener_count(), 0);
    }

    #[test]
    fn opening_another_closes_the_first() {
        let fx = fixture(2);
        let _binding = bound(&fx);

        fx.dom.click(fx.toggles[1]);
        fx.dom.click(fx.toggles[0]);
        assert!(has_class(&fx.dom, &fx.dropdowns[0], "is-active"));
        assert!(!has_class(&fx.dom, &fx.dropdowns[1], "is-active"));
        assert_eq!(fx.dom.document_listener_count(), 1);
    }

    #[test]
    fn outside_click_dismisses_and_removes_listener() {
        let fx = fixture(2);
        let _binding = bound(&fx);

        fx.dom.click(fx.toggles[0]);
        fx.dom.click(fx.outside);
        assert!(!has_class(&fx.dom, &fx.dropdowns[0], "is-active"));
        assert_eq!(fx.dom.document_listener_count(), 0);

        fx.dom.click(fx.toggles[1]);
        fx.dom.click(fx.items[1]);
        assert!(!has_class(&fx.dom, &fx.dropdowns[1], "is-active"));
    }

    #[test]
    fn dispose_removes_open_dismiss_listener() {
        let fx = fixture(1);
        let binding = bound(&fx);
        fx.dom.click(fx.toggles[0]);

        binding.dispose();
        assert_eq!(fx.dom.listener_count(), 0);
    }

    #[test]
    fn empty_page_binds_nothing() {
        let dom = MemoryDom::new();
        let ctx = PatternContext::new(dom.clone(), CalciteConfig::default());
        assert!(bind(&ctx, None).is_empty());
        assert_eq!(dom.listener_count(), 0);
    }
}
