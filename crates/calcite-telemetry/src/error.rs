//! Failures surfaced while configuring logging.

use thiserror::Error;

/// Logging setup errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber")]
    SubscriberInstall {
        /// Error from `try_init`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
    /// Logging settings were not valid JSON for the settings shape.
    #[error("failed to parse logging settings")]
    Settings {
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// A log format name was not recognised.
    #[error("unknown log format '{value}'")]
    UnknownFormat {
        /// Name supplied by the caller.
        value: String,
    },
}
