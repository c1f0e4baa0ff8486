//! Subscriber installation.
//!
//! # Design
//! - A single call installs the process-wide subscriber: an `EnvFilter`
//!   followed by a `fmt` layer rendering pretty lines or JSON objects.
//! - wasm32 builds route the `fmt` output into the browser console and skip
//!   timestamps; there is no clock to read.
//! - The chosen format is remembered so a page can ask whether logging is on.

use std::str::FromStr;

use anyhow::Result;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::TelemetryError;

/// Filter used when neither `RUST_LOG` nor the caller supplies one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

static INSTALLED: OnceCell<LogFormat> = OnceCell::new();

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Fails with [`TelemetryError::SubscriberInstall`] when a global subscriber
/// is already in place.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    install(config)?;
    INSTALLED.set(config.format).ok();
    tracing::debug!(filter = config.level, format = %config.format, "calcite logging on");
    Ok(())
}

/// Format chosen by the successful [`init_logging`] call, if there was one.
#[must_use]
pub fn installed_format() -> Option<LogFormat> {
    INSTALLED.get().copied()
}

/// Borrowed subscriber settings.
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig<'a> {
    /// `EnvFilter` directive, e.g. `calcite_patterns=trace`.
    pub level: &'a str,
    /// Rendering of each event.
    pub format: LogFormat,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            format: LogFormat::infer(),
        }
    }
}

/// Owned logging settings as page scripts supply them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// Filter directive.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::infer(),
        }
    }
}

impl LoggingSettings {
    /// Parse settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::Settings`] when the document is malformed.
    pub fn from_json(document: &str) -> Result<Self, TelemetryError> {
        serde_json::from_str(document).map_err(|source| TelemetryError::Settings { source })
    }

    /// Borrowed view for [`init_logging`].
    #[must_use]
    pub fn as_config(&self) -> LoggingConfig<'_> {
        LoggingConfig {
            level: &self.level,
            format: self.format,
        }
    }
}

/// How events are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Human-readable lines.
    Pretty,
}

impl LogFormat {
    /// Pretty in debug builds, JSON in release builds.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(TelemetryError::UnknownFormat {
                value: value.to_string(),
            }),
        }
    }
}

fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[cfg(not(target_arch = "wasm32"))]
fn install(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let subscriber = tracing_subscriber::registry().with(filter_for(config.level));
    let installed = match config.format {
        LogFormat::Json => subscriber
            .with(fmt::layer().json().with_current_span(false).with_target(true))
            .try_init(),
        LogFormat::Pretty => subscriber.with(fmt::layer().compact().with_target(true)).try_init(),
    };
    installed.map_err(|source| TelemetryError::SubscriberInstall { source })
}

#[cfg(target_arch = "wasm32")]
fn install(config: &LoggingConfig) -> Result<(), TelemetryError> {
    use crate::console::MakeConsoleWriter;

    let subscriber = tracing_subscriber::registry().with(filter_for(config.level));
    let installed = match config.format {
        LogFormat::Json => subscriber
            .with(
                fmt::layer()
                    .json()
                    .without_time()
                    .with_current_span(false)
                    .with_writer(MakeConsoleWriter),
            )
            .try_init(),
        LogFormat::Pretty => subscriber
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_ansi(false)
                    .with_writer(MakeConsoleWriter),
            )
            .try_init(),
    };
    installed.map_err(|source| TelemetryError::SubscriberInstall { source })
}
