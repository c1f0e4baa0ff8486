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

//! Browser entry point for the Calcite patterns.
//!
//! `runtime.rs` owns the namespace and the bindings page scripts create;
//! `bindings.rs` exposes it to JavaScript when built for wasm32.

pub mod runtime;

#[cfg(target_arch = "wasm32")]
mod bindings;

pub use runtime::Runtime;
