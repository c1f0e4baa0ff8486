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

//! DOM utility layer for the Calcite widget patterns.
//!
//! Layout: `backend.rs` (the [`Dom`] trait every backend implements),
//! `event.rs` (event kinds, the normalized [`DomEvent`], add/remove helpers),
//! `class.rs` (class token manipulation), `selector.rs` (the selector shape the
//! patterns query with), `traverse.rs` (`closest`, node list conversion),
//! `memory.rs` (arena document used natively and in tests) and `web.rs`
//! (`web-sys` backend, wasm32 only).

pub mod backend;
pub mod class;
pub mod error;
pub mod event;
pub mod memory;
pub mod selector;
pub mod traverse;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use backend::{Dom, Handler, ListenerId, Target, Tick, TimerId};
pub use class::{add_class, has_class, remove_class, toggle_class};
pub use error::{DomError, DomResult};
pub use event::{
    DomEvent, EventKind, KEY_ENTER, KEY_ESCAPE, add_event, click, event_target, prevent_default,
    remove_event, stop_propagation,
};
pub use memory::{MemoryDom, NodeId};
pub use selector::Selector;
pub use traverse::{closest, node_list_to_array};

#[cfg(target_arch = "wasm32")]
pub use web::WebDom;
