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

//! Logging setup shared by the Calcite crates.
//!
//! Layout: `init.rs` (subscriber installation and logging configuration),
//! `console.rs` (browser console writer used on wasm32), `error.rs`
//! (telemetry errors).

pub mod console;
pub mod error;
pub mod init;

pub use console::{ConsoleMethod, ConsoleWriter, MakeConsoleWriter};
pub use error::TelemetryError;
pub use init::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, LoggingSettings, init_logging, installed_format,
};
