//! Collapsible accordion sections.

use calcite_dom::{Dom, EventKind, KEY_ENTER, Target};

use crate::active::WidgetState;
use crate::binding::Binding;
use crate::context::PatternContext;
use crate::pattern::Pattern;

const ACCORDION: &str = "js-accordion";

/// Bind every `.js-accordion` under `root`.
///
/// Section headers (the first child of each section) become focusable tabs;
/// clicking one, or releasing Enter on it, flips that section alone.
pub fn bind<D: Dom>(ctx: &PatternContext<D>, root: Option<&D::Node>) -> Binding {
    let dom = ctx.dom();
    let mut binding = Binding::new(Pattern::Accordion);

    for accordion in ctx.find(root, ACCORDION) {
        dom.set_attribute(&accordion, "aria-live", "polite");
        dom.set_attribute(&accordion, "role", "tablist");

        for section in dom.children(&accordion) {
            let state = WidgetState::read(dom, &section, ctx.active_class());
            dom.set_attribute(&section, "aria-expanded", state.aria_expanded());

            let Some(header) = dom.children(&section).into_iter().next() else {
                continue;
            };
            dom.set_attribute(&header, "role", "tab");
            dom.set_attribute(&header, "tabindex", "0");

            let target = Target::Node(header);
            let (on_click, clicked) = (ctx.clone(), section.clone());
            binding.listen(dom, &target, EventKind::Click, move |_| {
                toggle(&on_click, &clicked);
            });
            let (on_key, keyed) = (ctx.clone(), section);
            binding.listen(dom, &target, EventKind::KeyUp, move |event| {
                if event.is_key(KEY_ENTER) {
                    toggle(&on_key, &keyed);
                }
            });
        }
    }

    tracing::debug!(listeners = binding.listener_count(), "accordion bound");
    binding
}

fn toggle<D: Dom>(ctx: &PatternContext<D>, section: &D::Node) {
    let dom = ctx.dom();
    let state = WidgetState::read(dom, section, ctx.active_class()).toggled();
    state.apply(dom, section, ctx.active_class());
    dom.set_attribute(section, "aria-expanded", state.aria_expanded());
    tracing::trace!(?state, "accordion section toggled");
}
