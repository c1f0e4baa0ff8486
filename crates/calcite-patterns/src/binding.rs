//! Ownership of the listeners and timers a controller installs.
//!
//! Dropping a [`Binding`] releases everything it owns, so a page that wants
//! patterns for its whole lifetime calls [`Binding::persist`].

use std::fmt;

use calcite_dom::{Dom, DomEvent, EventKind, Target, add_event, remove_event};

use crate::pattern::Pattern;

/// Resources installed by one controller run.
pub struct Binding {
    pattern: Pattern,
    listeners: usize,
    releases: Vec<Box<dyn FnOnce()>>,
}

impl Binding {
    /// Empty binding for `pattern`.
    #[must_use]
    pub fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            listeners: 0,
            releases: Vec::new(),
        }
    }

    /// Pattern that produced the binding.
    #[must_use]
    pub const fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Number of element listeners installed at bind time.
    #[must_use]
    pub const fn listener_count(&self) -> usize {
        self.listeners
    }

    /// Whether the controller found nothing to bind.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Attach a listener owned by this binding.
    pub(crate) fn listen<D, F>(
        &mut self,
        dom: &D,
        target: &Target<D::Node>,
        kind: EventKind,
        handler: F,
    ) where
        D: Dom,
        F: Fn(&DomEvent<D::Node>) + 'static,
    {
        let id = add_event(dom, target, kind, handler);
        let dom = dom.clone();
        self.listeners += 1;
        self.releases.push(Box::new(move || remove_event(&dom, id)));
    }

    /// Run `release` when the binding is dropped.
    pub(crate) fn on_release(&mut self, release: impl FnOnce() + 'static) {
        self.releases.push(Box::new(release));
    }

    /// Release everything now.
    pub fn dispose(self) {
        drop(self);
    }

    /// Keep everything installed for the lifetime of the page.
    pub fn persist(self) {
        std::mem::forget(self);
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        if self.releases.is_empty() {
            return;
        }
        tracing::debug!(pattern = %self.pattern, "releasing pattern binding");
        while let Some(release) = self.releases.pop() {
            release();
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Binding")
            .field("pattern", &self.pattern)
            .field("listeners", &self.listeners)
            .field("releases", &self.releases.len())
            .finish()
    }
}

/// Bindings produced by one bootstrap, in the order the patterns ran.
#[derive(Debug, Default)]
pub struct Bindings {
    inner: Vec<Binding>,
}

impl Bindings {
    pub(crate) fn push(&mut self, binding: Binding) {
        self.inner.push(binding);
    }

    /// Patterns that ran, in order.
    #[must_use]
    pub fn patterns(&self) -> Vec<Pattern> {
        self.inner.iter().map(Binding::pattern).collect()
    }

    /// Binding for `pattern`, if it ran.
    #[must_use]
    pub fn get(&self, pattern: Pattern) -> Option<&Binding> {
        self.inner.iter().find(|binding| binding.pattern == pattern)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no pattern ran.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Release every binding now, last bound first.
    pub fn dispose(mut self) {
        while let Some(binding) = self.inner.pop() {
            binding.dispose();
        }
    }

    /// Keep every binding for the lifetime of the page.
    pub fn persist(self) {
        for binding in self.inner {
            binding.persist();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use calcite_dom::MemoryDom;

    use super::*;

    #[test]
    fn drop_removes_listeners_and_runs_releases() {
        let dom = MemoryDom::new();
        let node = dom.append_element(dom.body_element(), "button", "");
        let released = Rc::new(Cell::new(false));

        let mut binding = Binding::new(Pattern::Accordion);
        binding.listen(&dom, &Target::Node(node), EventKind::Click, |_| {});
        let flag = Rc::clone(&released);
        binding.on_release(move || flag.set(true));
        assert_eq!(binding.listener_count(), 1);
        assert_eq!(dom.listener_count(), 1);

        binding.dispose();
        assert_eq!(dom.listener_count(), 0);
        assert!(released.get());
    }

    #[test]
    fn persist_keeps_listeners() {
        let dom = MemoryDom::new();
        let node = dom.append_element(dom.body_element(), "button", "");
        let mut binding = Binding::new(Pattern::Tabs);
        binding.listen(&dom, &Target::Node(node), EventKind::Click, |_| {});

        binding.persist();
        assert_eq!(dom.listener_count(), 1);
    }
}
