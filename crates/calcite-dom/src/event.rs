//! Event kinds and the normalized event passed to pattern handlers.

use std::cell::Cell;
use std::rc::Rc;

use crate::backend::{Dom, ListenerId, Target};

/// `KeyboardEvent.key` for the Enter key.
pub const KEY_ENTER: &str = "Enter";

/// `KeyboardEvent.key` for the Escape key.
pub const KEY_ESCAPE: &str = "Escape";

/// Event types the patterns listen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer or keyboard activation.
    Click,
    /// Key released.
    KeyUp,
    /// Focus entered an element or one of its descendants.
    FocusIn,
    /// Focus left an element or one of its descendants.
    FocusOut,
}

impl EventKind {
    /// DOM event type string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyUp => "keyup",
            Self::FocusIn => "focusin",
            Self::FocusOut => "focusout",
        }
    }
}

/// Backend-independent view of a dispatched event.
///
/// Cancellation flags are interior-mutable so handlers receive `&DomEvent`;
/// the backend applies them to the host event once the handler returns.
#[derive(Debug)]
pub struct DomEvent<N> {
    kind: EventKind,
    target: Option<N>,
    key: Option<String>,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl<N> DomEvent<N> {
    /// Build an event of `kind` aimed at `target`.
    #[must_use]
    pub const fn new(kind: EventKind, target: Option<N>) -> Self {
        Self {
            kind,
            target,
            key: None,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    /// Attach the keyboard key that produced the event.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Event type.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Element the event was dispatched at.
    #[must_use]
    pub const fn target(&self) -> Option<&N> {
        self.target.as_ref()
    }

    /// Keyboard key, for key events.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Whether the event carries `key`.
    #[must_use]
    pub fn is_key(&self, key: &str) -> bool {
        self.key() == Some(key)
    }

    /// Suppress the host's default action.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Stop the event from reaching ancestors.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// Whether a handler called [`DomEvent::prevent_default`].
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// Whether a handler called [`DomEvent::stop_propagation`].
    #[must_use]
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

/// Standard interaction event. Touch support would branch here.
#[must_use]
pub const fn click() -> EventKind {
    EventKind::Click
}

/// Attach `handler` to `kind` events on `target`.
pub fn add_event<D, F>(dom: &D, target: &Target<D::Node>, kind: EventKind, handler: F) -> ListenerId
where
    D: Dom,
    F: Fn(&DomEvent<D::Node>) + 'static,
{
    dom.listen(target, kind, Rc::new(handler))
}

/// Remove a listener installed with [`add_event`].
pub fn remove_event<D: Dom>(dom: &D, id: ListenerId) {
    dom.unlisten(id);
}

/// Element the event was dispatched at.
#[must_use]
pub const fn event_target<N>(event: &DomEvent<N>) -> Option<&N> {
    event.target()
}

/// Suppress the host's default action for `event`.
pub fn prevent_default<N>(event: &DomEvent<N>) {
    event.prevent_default();
}

/// Stop `event` from bubbling further.
pub fn stop_propagation<N>(event: &DomEvent<N>) {
    event.stop_propagation();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_start_clear_and_latch() {
        let event = DomEvent::new(EventKind::Click, Some(1_u8));
        assert!(!event.default_prevented());
        assert!(!event.propagation_stopped());

        prevent_default(&event);
        stop_propagation(&event);
        assert!(event.default_prevented());
        assert!(event.propagation_stopped());
        assert_eq!(event_target(&event), Some(&1));
    }

    #[test]
    fn key_matching_is_exact() {
        let event = DomEvent::new(EventKind::KeyUp, None::<u8>).with_key(KEY_ESCAPE);
        assert!(event.is_key(KEY_ESCAPE));
        assert!(!event.is_key(KEY_ENTER));
        assert_eq!(click().as_str(), "click");
        assert_eq!(EventKind::FocusOut.as_str(), "focusout");
    }
}
