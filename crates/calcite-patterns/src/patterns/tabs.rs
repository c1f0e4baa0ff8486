//! Tab groups switching between content panes by position.

use calcite_dom::{Dom, DomEvent, EventKind, KEY_ENTER, Target, add_class, closest};

use crate::active::{WidgetState, remove_active};
use crate::binding::Binding;
use crate::context::PatternContext;
use crate::error::{PatternError, PatternResult};
use crate::pattern::Pattern;

const GROUP: &str = "js-tab-group";
const TAB: &str = "js-tab";
const SECTION: &str = "js-tab-section";

/// `max-width` value giving each of `count` tabs an equal share.
#[must_use]
pub fn tab_width(count: usize) -> String {
    #[allow(clippy::cast_precision_loss)]
    let percent = 100.0 / count.max(1) as f64;
    format!("{percent}%")
}

/// Activate the tab at `index` of `group` and the pane at the same index.
///
/// # Errors
///
/// Returns [`PatternError::MissingPane`] when the group has fewer panes than
/// `index + 1`; the group is left unchanged.
pub fn select<D: Dom>(ctx: &PatternContext<D>, group: &D::Node, index: usize) -> PatternResult<()> {
    let dom = ctx.dom();
    let active = ctx.active_class();
    let tabs = ctx.find(Some(group), TAB);
    let panes = ctx.find(Some(group), SECTION);
    let (Some(tab), Some(pane)) = (tabs.get(index), panes.get(index)) else {
        return Err(PatternError::MissingPane {
            index,
            panes: panes.len(),
        });
    };

    remove_active(dom, &tabs, active);
    remove_active(dom, &panes, active);
    for node in tabs.iter().chain(&panes) {
        dom.set_attribute(node, "aria-expanded", WidgetState::Closed.aria_expanded());
    }
    for node in [tab, pane] {
        add_class(dom, node, active);
        dom.set_attribute(node, "aria-expanded", WidgetState::Open.aria_expanded());
    }
    tracing::trace!(index, "tab selected");
    Ok(())
}

fn switch<D: Dom>(ctx: &PatternContext<D>, event: &DomEvent<D::Node>) {
    event.prevent_default();
    let dom = ctx.dom();
    let Some(tab) = event.target().and_then(|target| closest(dom, TAB, target)) else {
        return;
    };
    let Some(group) = closest(dom, GROUP, &tab) else {
        return;
    };
    let Some(index) = ctx.find(Some(&group), TAB).iter().position(|node| *node == tab) else {
        return;
    };
    if let Err(error) = select(ctx, &group, index) {
        ctx.report(error);
    }
}

/// Bind every tab group, tab and pane under `root`.
pub fn bind<D: Dom>(ctx: &PatternContext<D>, root: Option<&D::Node>) -> Binding {
    let dom = ctx.dom();
    let mut binding = Binding::new(Pattern::Tabs);

    for group in ctx.find(root, GROUP) {
        dom.set_attribute(&group, "aria-live", "polite");
        if let Some(list) = dom.children(&group).first() {
            dom.set_attribute(list, "role", "tablist");
        }
        let tabs = ctx.find(Some(&group), TAB);
        let width = tab_width(tabs.len());
        for tab in &tabs {
            dom.set_style(tab, "max-width", Some(&width));
        }
    }

    for tab in ctx.find(root, TAB) {
        dom.set_attribute(&tab, "aria-expanded", WidgetState::Closed.aria_expanded());
        dom.set_attribute(&tab, "role", "tab");
        dom.set_attribute(&tab, "tabindex", "0");

        let target = Target::Node(tab);
        let on_click = ctx.clone();
        binding.listen(dom, &target, EventKind::Click, move |event| {
            switch(&on_click, event);
        });
        let on_key = ctx.clone();
        binding.listen(dom, &target, EventKind::KeyUp, move |event| {
            if event.is_key(KEY_ENTER) {
                switch(&on_key, event);
            }
        });
    }

    for section in ctx.find(root, SECTION) {
        dom.set_attribute(&section, "role", "tabpanel");
        let state = WidgetState::read(dom, &section, ctx.active_class());
        dom.set_attribute(&section, "aria-expanded", state.aria_expanded());
    }

    tracing::debug!(listeners = binding.listener_count(), "tabs bound");
    binding
}
