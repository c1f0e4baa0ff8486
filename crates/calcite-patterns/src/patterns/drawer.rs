//! Off-canvas drawers opened by `data-drawer` toggles.

use calcite_dom::Dom;

use super::overlay::{self, Backdrop, OverlayKind};
use crate::binding::Binding;
use crate::context::PatternContext;
use crate::pattern::Pattern;

static DRAWER: OverlayKind = OverlayKind {
    pattern: Pattern::Drawer,
    overlay_class: "js-drawer",
    toggle_class: "js-drawer-toggle",
    id_attribute: "data-drawer",
    enclosing_fallback: false,
    contain_clicks: false,
    backdrop: Backdrop::TargetClass("drawer"),
};

/// Bind every `.js-drawer-toggle` and `.js-drawer` under `root`.
pub fn bind<D: Dom>(ctx: &PatternContext<D>, root: Option<&D::Node>) -> Binding {
    overlay::bind(ctx, root, &DRAWER)
}
