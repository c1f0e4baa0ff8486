//! Focus-trapping overlays shared by the drawer and modal controllers.
//!
//! # Design
//! - At most one overlay of a scan is open. Opening another deactivates the
//!   first without moving focus.
//! - Drawers and modals share one open slot on the context: opening either
//!   closes whichever other overlay is open, so two focus fences are never
//!   armed at once.
//! - While open, the layout landmarks carry `aria-hidden="true"` and two
//!   document listeners are armed: Escape closes, `focusin` outside any
//!   overlay pulls focus back in.
//! - Every closing path (toggle, Escape, backdrop) runs [`Overlay::close`],
//!   which disarms both listeners and hands focus back to the last trigger.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use calcite_dom::{
    Dom, DomEvent, EventKind, KEY_ESCAPE, ListenerId, Selector, Target, add_class, add_event,
    closest, has_class, remove_class, remove_event,
};

use crate::active::{WidgetState, set_aria_hidden};
use crate::binding::Binding;
use crate::context::{Dismiss, PatternContext};
use crate::error::PatternError;
use crate::pattern::Pattern;

/// How a click on the overlay itself is recognised as a backdrop click.
#[derive(Clone, Copy, Debug)]
pub(super) enum Backdrop {
    /// The click target carries this class.
    TargetClass(&'static str),
    /// The click target is the overlay element.
    OverlayItself,
}

/// Marker classes and behaviour switches for one overlay flavour.
#[derive(Debug)]
pub(super) struct OverlayKind {
    pub(super) pattern: Pattern,
    pub(super) overlay_class: &'static str,
    pub(super) toggle_class: &'static str,
    pub(super) id_attribute: &'static str,
    /// Toggles without an id close the overlay they sit in.
    pub(super) enclosing_fallback: bool,
    /// Clicks inside the overlay never reach its ancestors.
    pub(super) contain_clicks: bool,
    pub(super) backdrop: Backdrop,
}

struct OverlayState<N> {
    open: Option<N>,
    last_trigger: Option<N>,
    escape: Option<ListenerId>,
    fence: Option<ListenerId>,
}

struct Overlay<D: Dom> {
    ctx: PatternContext<D>,
    kind: &'static OverlayKind,
    overlays: Vec<D::Node>,
    landmarks: Vec<D::Node>,
    state: RefCell<OverlayState<D::Node>>,
    refocusing: Cell<bool>,
}

impl<D: Dom> Overlay<D> {
    fn resolve(&self, toggle: &D::Node) -> Option<D::Node> {
        let dom = self.ctx.dom();
        match dom.attribute(toggle, self.kind.id_attribute) {
            Some(id) => {
                let selector = Selector::class(self.kind.overlay_class)
                    .with_attribute(self.kind.id_attribute, id);
                match self.ctx.resolve(self.kind.pattern, &selector) {
                    Ok(node) => Some(node),
                    Err(error) => {
                        self.ctx.report(error);
                        None
                    }
                }
            }
            None if self.kind.enclosing_fallback => {
                let found = closest(dom, self.kind.overlay_class, toggle);
                if found.is_none() {
                    self.ctx.report(PatternError::TargetNotFound {
                        pattern: self.kind.pattern,
                        selector: Selector::class(self.kind.overlay_class).to_css(),
                    });
                }
                found
            }
            None => {
                self.ctx.report(PatternError::TargetNotFound {
                    pattern: self.kind.pattern,
                    selector: Selector::class(self.kind.overlay_class)
                        .with_attribute(self.kind.id_attribute, "")
                        .to_css(),
                });
                None
            }
        }
    }

    fn toggle(self: &Rc<Self>, toggle: &D::Node) {
        let Some(target) = self.resolve(toggle) else {
            return;
        };
        if WidgetState::read(self.ctx.dom(), &target, self.ctx.active_class()).is_open() {
            self.close();
        } else {
            self.open(&target, toggle);
        }
    }

    fn open(self: &Rc<Self>, target: &D::Node, trigger: &D::Node) {
        let me: Weak<dyn Dismiss> = Rc::downgrade(self) as Weak<Self>;
        self.ctx.claim_overlay(me);

        let dom = self.ctx.dom();
        let active = self.ctx.active_class();
        let previous = self.state.borrow().open.clone();
        for other in self.overlays.iter().chain(previous.as_ref()) {
            if other != target {
                remove_class(dom, other, active);
                dom.remove_attribute(other, "tabindex");
            }
        }

        add_class(dom, target, active);
        set_aria_hidden(dom, &self.landmarks, true);
        {
            let mut state = self.state.borrow_mut();
            state.open = Some(target.clone());
            state.last_trigger = Some(trigger.clone());
        }
        self.arm();
        dom.set_attribute(target, "tabindex", "0");
        dom.focus(target);
        tracing::trace!(pattern = %self.kind.pattern, "overlay opened");
    }

    fn close(&self) {
        let dom = self.ctx.dom();
        let (open, trigger) = {
            let mut state = self.state.borrow_mut();
            (state.open.take(), state.last_trigger.take())
        };
        for overlay in self.overlays.iter().chain(open.as_ref()) {
            remove_class(dom, overlay, self.ctx.active_class());
            dom.remove_attribute(overlay, "tabindex");
        }
        set_aria_hidden(dom, &self.landmarks, false);
        self.disarm();
        self.ctx.release_overlay(self);
        if let Some(trigger) = trigger {
            dom.focus(&trigger);
        }
        tracing::trace!(pattern = %self.kind.pattern, "overlay closed");
    }

    fn arm(self: &Rc<Self>) {
        let armed = self.state.borrow().escape.is_some();
        if armed {
            return;
        }
        let dom = self.ctx.dom();

        let on_escape = Rc::clone(self);
        let escape = add_event(dom, &Target::Document, EventKind::KeyUp, move |event| {
            if event.is_key(KEY_ESCAPE) {
                on_escape.close();
            }
        });
        let on_focus = Rc::clone(self);
        let fence = add_event(dom, &Target::Document, EventKind::FocusIn, move |event| {
            on_focus.fence(event);
        });

        let mut state = self.state.borrow_mut();
        state.escape = Some(escape);
        state.fence = Some(fence);
    }

    fn disarm(&self) {
        let (escape, fence) = {
            let mut state = self.state.borrow_mut();
            (state.escape.take(), state.fence.take())
        };
        for id in escape.into_iter().chain(fence) {
            remove_event(self.ctx.dom(), id);
        }
    }

    fn fence(&self, event: &DomEvent<D::Node>) {
        let dom = self.ctx.dom();
        let inside = event
            .target()
            .is_some_and(|target| closest(dom, self.kind.overlay_class, target).is_some());
        if inside || self.refocusing.get() {
            return;
        }
        let open = self.state.borrow().open.clone();
        if let Some(open) = open {
            self.refocusing.set(true);
            dom.focus(&open);
            self.refocusing.set(false);
        }
    }

    /// Close when open; always drop the document listeners.
    fn release(&self) {
        let open = self.state.borrow().open.is_some();
        if open {
            self.close();
        }
        self.disarm();
    }

    fn backdrop(&self, overlay: &D::Node, event: &DomEvent<D::Node>) {
        let dom = self.ctx.dom();
        if self.kind.contain_clicks {
            event.stop_propagation();
        }
        let Some(target) = event.target() else {
            return;
        };
        let hit = match self.kind.backdrop {
            Backdrop::TargetClass(class) => has_class(dom, target, class),
            Backdrop::OverlayItself => target == overlay,
        };
        if hit && WidgetState::read(dom, overlay, self.ctx.active_class()).is_open() {
            self.close();
        }
    }
}

impl<D: Dom> Dismiss for Overlay<D> {
    fn dismiss(&self) {
        let open = self.state.borrow().open.is_some();
        if open {
            self.close();
        }
    }
}

/// Bind the toggles and overlays of one flavour under `root`.
pub(super) fn bind<D: Dom>(
    ctx: &PatternContext<D>,
    root: Option<&D::Node>,
    kind: &'static OverlayKind,
) -> Binding {
    let dom = ctx.dom();
    let mut binding = Binding::new(kind.pattern);
    let toggles = ctx.find(root, kind.toggle_class);
    let overlays = ctx.find(root, kind.overlay_class);
    if toggles.is_empty() && overlays.is_empty() {
        return binding;
    }

    let overlay = Rc::new(Overlay {
        ctx: ctx.clone(),
        kind,
        overlays: overlays.clone(),
        landmarks: ctx.landmarks(),
        state: RefCell::new(OverlayState {
            open: None,
            last_trigger: None,
            escape: None,
            fence: None,
        }),
        refocusing: Cell::new(false),
    });

    for toggle in toggles {
        let handle = Rc::clone(&overlay);
        let bound = toggle.clone();
        binding.listen(dom, &Target::Node(toggle), EventKind::Click, move |event| {
            event.prevent_default();
            handle.toggle(&bound);
        });
    }
    for element in overlays {
        let handle = Rc::clone(&overlay);
        let bound = element.clone();
        binding.listen(dom, &Target::Node(element), EventKind::Click, move |event| {
            handle.backdrop(&bound, event);
        });
    }
    binding.on_release(move || overlay.release());

    tracing::debug!(
        pattern = %kind.pattern,
        listeners = binding.listener_count(),
        "overlay pattern bound"
    );
    binding
}
