//! Panels that expand under the top navigation.

use std::rc::Rc;

use calcite_dom::{Dom, EventKind, Selector, Target, add_class, closest, remove_class};

use crate::active::{WidgetState, remove_active, toggle_active};
use crate::binding::Binding;
use crate::context::PatternContext;
use crate::error::PatternError;
use crate::pattern::Pattern;

const EXPANDER: &str = "js-expanding";
const SECTION: &str = "js-expanding-nav";
const TOGGLE: &str = "js-expanding-toggle";
const ID_ATTRIBUTE: &str = "data-expanding-nav";

struct Expanders<D: Dom> {
    ctx: PatternContext<D>,
    expanders: Vec<D::Node>,
}

impl<D: Dom> Expanders<D> {
    fn toggle(&self, toggle: &D::Node) {
        let dom = self.ctx.dom();
        let active = self.ctx.active_class();
        let Some(id) = dom.attribute(toggle, ID_ATTRIBUTE) else {
            self.ctx.report(PatternError::TargetNotFound {
                pattern: Pattern::ExpandingNav,
                selector: Selector::class(SECTION).with_attribute(ID_ATTRIBUTE, "").to_css(),
            });
            return;
        };
        let selector = Selector::class(SECTION).with_attribute(ID_ATTRIBUTE, id);
        let section = match self.ctx.resolve(Pattern::ExpandingNav, &selector) {
            Ok(section) => section,
            Err(error) => {
                self.ctx.report(error);
                return;
            }
        };
        let Some(expander) = closest(dom, EXPANDER, &section) else {
            self.ctx.report(PatternError::TargetNotFound {
                pattern: Pattern::ExpandingNav,
                selector: Selector::class(EXPANDER).to_css(),
            });
            return;
        };

        let expander_open = WidgetState::read(dom, &expander, active).is_open();
        let section_open = WidgetState::read(dom, &section, active).is_open();

        // Sections are exclusive across every expander on the page.
        let sections = self.ctx.find(None, SECTION);
        toggle_active(dom, &sections, &section, active);

        if expander_open && section_open {
            remove_class(dom, &expander, active);
        } else {
            let others: Vec<_> = self
                .expanders
                .iter()
                .filter(|other| **other != expander)
                .cloned()
                .collect();
            remove_active(dom, &others, active);
            add_class(dom, &expander, active);
        }
        tracing::trace!(open = !section_open, "expanding nav toggled");
    }
}

/// Bind every `.js-expanding-toggle` under `root`.
pub fn bind<D: Dom>(ctx: &PatternContext<D>, root: Option<&D::Node>) -> Binding {
    let dom = ctx.dom();
    let mut binding = Binding::new(Pattern::ExpandingNav);
    let toggles = ctx.find(root, TOGGLE);
    if toggles.is_empty() {
        return binding;
    }

    let expanders = Rc::new(Expanders {
        ctx: ctx.clone(),
        expanders: ctx.find(root, EXPANDER),
    });
    for toggle in toggles {
        let expanders = Rc::clone(&expanders);
        let bound = toggle.clone();
        binding.listen(dom, &Target::Node(toggle), EventKind::Click, move |event| {
            event.prevent_default();
            expanders.toggle(&bound);
        });
    }

    tracing::debug!(listeners = binding.listener_count(), "expanding nav bound");
    binding
}

#[cfg(test)]
mod tests {
    use calcite_dom::{MemoryDom, NodeId, has_class};

    use super::*;
    use crate::config::CalciteConfig;

    struct Fixture {
        dom: MemoryDom,
        expander: NodeId,
        sections: Vec<NodeId>,
        toggles: Vec<NodeId>,
    }

    fn fixture(ids: &[&str]) -> Fixture {
        let dom = MemoryDom::new();
        let body = dom.body_element();
        let nav = dom.append_element(body, "nav", "top-nav");
        let expander = dom.append_element(body, "div", "expanding-nav js-expanding");
        let mut toggles = Vec::new();
        let mut sections = Vec::new();
        for id in ids {
            let toggle = dom.append_element(nav, "a", "js-expanding-toggle");
            dom.set_attribute(&toggle, ID_ATTRIBUTE, id);
            let section = dom.append_element(expander, "div", "js-expanding-nav");
            dom.set_attribute(&section, ID_ATTRIBUTE, id);
            toggles.push(toggle);
            sections.push(section);
        }
        Fixture {
            dom,
            expander,
            sections,
            toggles,
        }
    }

    #[test]
    fn open_switch_and_close() {
        let fx = fixture(&["products", "docs"]);
        let ctx = PatternContext::new(fx.dom.clone(), CalciteConfig::default());
        let _binding = bind(&ctx, None);

        fx.dom.click(fx.toggles[0]);
        assert!(has_class(&fx.dom, &fx.expander, "is-active"));
        assert!(has_class(&fx.dom, &fx.sections[0], "is-active"));

        fx.dom.click(fx.toggles[1]);
        assert!(has_class(&fx.dom, &fx.expander, "is-active"));
        assert!(!has_class(&fx.dom, &fx.sections[0], "is-active"));
        assert!(has_class(&fx.dom, &fx.sections[1], "is-active"));

        fx.dom.click(fx.toggles[1]);
        assert!(!has_class(&fx.dom, &fx.expander, "is-active"));
        assert!(!has_class(&fx.dom, &fx.sections[1], "is-active"));
    }

    #[test]
    fn missing_section_leaves_expander_alone() {
        let fx = fixture(&["products"]);
        fx.dom.set_attribute(&fx.toggles[0], ID_ATTRIBUTE, "gone");
        let ctx = PatternContext::new(fx.dom.clone(), CalciteConfig::default());
        let _binding = bind(&ctx, None);

        fx.dom.click(fx.toggles[0]);
        assert!(!has_class(&fx.dom, &fx.expander, "is-active"));
        assert_eq!(ctx.take_diagnostics().len(), 1);
    }

    #[test]
    fn toggle_without_id_is_reported() {
        let fx = fixture(&["products"]);
        fx.dom.remove_attribute(&fx.toggles[0], ID_ATTRIBUTE);
        let ctx = PatternContext::new(fx.dom.clone(), CalciteConfig::default());
        let _binding = bind(&ctx, None);

        fx.dom.click(fx.toggles[0]);
        assert!(!has_class(&fx.dom, &fx.sections[0], "is-active"));
        assert!(matches!(
            ctx.take_diagnostics().as_slice(),
            [PatternError::TargetNotFound { pattern: Pattern::ExpandingNav, selector }]
                if selector.contains(ID_ATTRIBUTE)
        ));
    }

    #[test]
    fn section_outside_any_expander_is_reported_and_untouched() {
        let fx = fixture(&["products"]);
        let orphan = fx.dom.append_element(fx.dom.body_element(), "div", "js-expanding-nav");
        fx.dom.set_attribute(&orphan, ID_ATTRIBUTE, "orphan");
        let toggle = fx.dom.append_element(fx.dom.body_element(), "a", "js-expanding-toggle");
        fx.dom.set_attribute(&toggle, ID_ATTRIBUTE, "orphan");
        let ctx = PatternContext::new(fx.dom.clone(), CalciteConfig::default());
        let _binding = bind(&ctx, None);

        fx.dom.click(toggle);
        assert!(!has_class(&fx.dom, &orphan, "is-active"));
        assert!(matches!(
            ctx.take_diagnostics().as_slice(),
            [PatternError::TargetNotFound { selector, .. }] if selector == ".js-expanding"
        ));
    }
}
