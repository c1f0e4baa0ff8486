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

//! Shared test helpers used across the pattern suites.
//! Layout: fixtures.rs (widget markup built on `MemoryDom`), assert.rs (class
//! and attribute checks).

pub mod assert;
pub mod fixtures;
