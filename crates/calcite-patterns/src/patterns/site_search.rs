//! Site search field that expands while it holds focus.

use calcite_dom::{Dom, EventKind, Target, add_class, remove_class};

use crate::binding::Binding;
use crate::context::PatternContext;
use crate::pattern::Pattern;

const SEARCH: &str = "js-site-search";

/// Bind every `.js-site-search` under `root`.
///
/// Focus entering the container opens it; focus leaving closes it and clears
/// the element that lost focus.
pub fn bind<D: Dom>(ctx: &PatternContext<D>, root: Option<&D::Node>) -> Binding {
    let dom = ctx.dom();
    let mut binding = Binding::new(Pattern::SiteSearch);

    for search in ctx.find(root, SEARCH) {
        let target = Target::Node(search.clone());

        let on_focus = ctx.clone();
        let container = search.clone();
        binding.listen(dom, &target, EventKind::FocusIn, move |_| {
            add_class(on_focus.dom(), &container, on_focus.active_class());
            tracing::trace!("site search opened");
        });

        let on_blur = ctx.clone();
        let container = search;
        binding.listen(dom, &target, EventKind::FocusOut, move |event| {
            let dom = on_blur.dom();
            remove_class(dom, &container, on_blur.active_class());
            if let Some(field) = event.target() {
                dom.set_value(field, "");
            }
            tracing::trace!("site search closed");
        });
    }

    tracing::debug!(listeners = binding.listener_count(), "site search bound");
    binding
}
