//! Shared state handed to every pattern controller.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use calcite_dom::{Dom, Selector};

use crate::config::{CalciteConfig, MissingTargetPolicy};
use crate::error::{PatternError, PatternResult};
use crate::pattern::Pattern;

/// An open widget that can be closed when another takes its place.
pub(crate) trait Dismiss {
    fn dismiss(&self);
}

/// DOM backend, configuration and diagnostics sink for one namespace.
#[derive(Clone)]
pub struct PatternContext<D: Dom> {
    dom: D,
    config: Rc<CalciteConfig>,
    diagnostics: Rc<RefCell<Vec<PatternError>>>,
    open_overlay: Rc<RefCell<Option<Weak<dyn Dismiss>>>>,
}

impl<D: Dom> PatternContext<D> {
    /// Build a context. The configuration is assumed to be validated.
    #[must_use]
    pub fn new(dom: D, config: CalciteConfig) -> Self {
        Self {
            dom,
            config: Rc::new(config),
            diagnostics: Rc::new(RefCell::new(Vec::new())),
            open_overlay: Rc::new(RefCell::new(None)),
        }
    }

    /// DOM backend.
    #[must_use]
    pub const fn dom(&self) -> &D {
        &self.dom
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &CalciteConfig {
        &self.config
    }

    /// Class marking open/selected widgets.
    #[must_use]
    pub fn active_class(&self) -> &str {
        &self.config.active_class
    }

    /// Elements carrying `class` under `root`, or in the whole document.
    #[must_use]
    pub fn find(&self, root: Option<&D::Node>, class: &str) -> Vec<D::Node> {
        self.dom.query_all(root, &Selector::class(class))
    }

    /// First element of each configured landmark class that exists.
    #[must_use]
    pub fn landmarks(&self) -> Vec<D::Node> {
        self.config
            .landmarks
            .iter()
            .filter_map(|class| self.dom.query(&Selector::class(class.as_str())))
            .collect()
    }

    /// Resolve `selector` document-wide.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::TargetNotFound`] when nothing matches.
    pub fn resolve(&self, pattern: Pattern, selector: &Selector) -> PatternResult<D::Node> {
        self.dom
            .query(selector)
            .ok_or_else(|| PatternError::TargetNotFound {
                pattern,
                selector: selector.to_css(),
            })
    }

    /// Apply the missing-target policy to a failed lookup.
    pub fn report(&self, error: PatternError) {
        match self.config.missing_target {
            MissingTargetPolicy::Ignore => {
                tracing::trace!(error = %error, "ignoring unresolved pattern target");
            }
            MissingTargetPolicy::Report => {
                tracing::warn!(error = %error, "pattern target unresolved; widget left unchanged");
                self.diagnostics.borrow_mut().push(error);
            }
        }
    }

    /// Record `claimant` as the open overlay, dismissing whichever other
    /// overlay held the slot. Drawers and modals share one slot.
    pub(crate) fn claim_overlay(&self, claimant: Weak<dyn Dismiss>) {
        let previous = self.open_overlay.borrow_mut().replace(claimant.clone());
        let displaced = previous
            .filter(|previous| !std::ptr::addr_eq(previous.as_ptr(), claimant.as_ptr()))
            .and_then(|previous| previous.upgrade());
        if let Some(displaced) = displaced {
            displaced.dismiss();
        }
    }

    /// Clear the open-overlay slot if `owner` holds it.
    pub(crate) fn release_overlay<T>(&self, owner: &T) {
        let mut slot = self.open_overlay.borrow_mut();
        let held = slot
            .as_ref()
            .is_some_and(|current| std::ptr::addr_eq(current.as_ptr(), std::ptr::from_ref(owner)));
        if held {
            *slot = None;
        }
    }

    /// Drain recorded diagnostics.
    #[must_use]
    pub fn take_diagnostics(&self) -> Vec<PatternError> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }
}
