//! `fmt` writer that forwards formatted events to the browser console.
//!
//! Each event is buffered and emitted as one console call on drop, routed to
//! the console method matching its level.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Console method an event is emitted through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleMethod {
    /// `console.error`
    Error,
    /// `console.warn`
    Warn,
    /// `console.info`
    Info,
    /// `console.debug`
    Debug,
    /// `console.log`
    Log,
}

impl ConsoleMethod {
    /// Method for events at `level`.
    #[must_use]
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            Level::DEBUG => Self::Debug,
            _ => Self::Log,
        }
    }
}

/// [`MakeWriter`] producing one [`ConsoleWriter`] per event.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(ConsoleMethod::Log)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(ConsoleMethod::for_level(*meta.level()))
    }
}

/// Buffer for one formatted event.
#[derive(Debug)]
pub struct ConsoleWriter {
    method: ConsoleMethod,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(method: ConsoleMethod) -> Self {
        Self {
            method,
            buffer: Vec::new(),
        }
    }

    /// Buffered text without the trailing newline the formatter appends.
    #[must_use]
    pub fn message(&self) -> String {
        String::from_utf8_lossy(&self.buffer).trim_end().to_string()
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        emit(self.method, &self.message());
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(method: ConsoleMethod, message: &str) {
    match method {
        ConsoleMethod::Error => gloo::console::error!(message),
        ConsoleMethod::Warn => gloo::console::warn!(message),
        ConsoleMethod::Info => gloo::console::info!(message),
        ConsoleMethod::Debug => gloo::console::debug!(message),
        ConsoleMethod::Log => gloo::console::log!(message),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(method: ConsoleMethod, message: &str) {
    use std::io::Write as _;

    let stderr = io::stderr();
    let mut handle = stderr.lock();
    writeln!(handle, "[{method:?}] {message}").ok();
}
