#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(missing_docs, unreachable_pub)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

//! Accessible UI widget patterns driven by marker classes.
//!
//! Layout: `pattern.rs` (pattern names), `config.rs` (namespace
//! configuration), `context.rs` (state shared by controllers), `active.rs`
//! (active-class and aria helpers), `binding.rs` (listener ownership),
//! `patterns/` (one controller per widget) and `namespace.rs` (the
//! [`Calcite`] entry point).

pub mod active;
pub mod binding;
pub mod config;
pub mod context;
pub mod error;
pub mod namespace;
pub mod pattern;
pub mod patterns;

pub use active::{WidgetState, remove_active, set_aria_hidden, toggle_active, toggle_aria_hidden};
pub use binding::{Binding, Bindings};
pub use config::{CalciteConfig, ConfigError, ConfigResult, MissingTargetPolicy};
pub use context::PatternContext;
pub use error::{PatternError, PatternResult};
pub use namespace::{Calcite, VERSION};
pub use pattern::Pattern;
pub use patterns::StickyHandle;

pub use calcite_dom::{
    Dom, DomEvent, EventKind, MemoryDom, NodeId, Selector, Target, add_class, add_event, click,
    closest, event_target, has_class, node_list_to_array, prevent_default, remove_class,
    remove_event, stop_propagation, toggle_class,
};
