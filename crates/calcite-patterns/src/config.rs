//! Configuration for the pattern namespace.
//!
//! # Design
//! - Every field has a default matching the stock stylesheet, so an empty JSON
//!   object is a valid configuration.
//! - Parsing and validation are separate; [`CalciteConfig::from_json`] runs both.

use std::collections::HashSet;
use std::time::Duration;

use calcite_dom::Selector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pattern::Pattern;

/// Class marking an open or selected widget.
pub const DEFAULT_ACTIVE_CLASS: &str = "is-active";

/// Sticky poll period in milliseconds.
pub const DEFAULT_STICKY_INTERVAL_MS: u64 = 10;

const SECTION: &str = "calcite";

/// Structured errors emitted while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Field contained an invalid value.
    #[error("invalid value for '{field}' in '{section}': {message}")]
    InvalidField {
        /// Section that failed validation.
        section: String,
        /// Field that failed validation.
        field: String,
        /// Human-readable error description.
        message: String,
    },
    /// Document was not valid JSON for the configuration shape.
    #[error("failed to parse configuration")]
    Parse {
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// What to do when a toggle's `data-*` id resolves to nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTargetPolicy {
    /// Leave the widget untouched and say nothing.
    Ignore,
    /// Leave the widget untouched, log a warning and record a diagnostic.
    #[default]
    Report,
}

/// Namespace configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalciteConfig {
    /// Patterns bound by `init` when no explicit list is given, in order.
    pub patterns: Vec<Pattern>,
    /// Class marking open/selected widgets.
    pub active_class: String,
    /// Classes of the layout landmarks hidden while an overlay is open.
    pub landmarks: Vec<String>,
    /// Sticky poll period in milliseconds.
    pub sticky_interval_ms: u64,
    /// Policy for unresolved `data-*` ids.
    pub missing_target: MissingTargetPolicy,
}

impl Default for CalciteConfig {
    fn default() -> Self {
        Self {
            patterns: Pattern::ALL.to_vec(),
            active_class: DEFAULT_ACTIVE_CLASS.to_string(),
            landmarks: vec!["wrapper".to_string(), "footer".to_string()],
            sticky_interval_ms: DEFAULT_STICKY_INTERVAL_MS,
            missing_target: MissingTargetPolicy::default(),
        }
    }
}

impl CalciteConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed input and
    /// [`ConfigError::InvalidField`] when validation fails.
    pub fn from_json(document: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(document).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Check field invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] for an unusable class name, a zero
    /// poll period, or a pattern listed twice.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_class("active_class", &self.active_class)?;
        for landmark in &self.landmarks {
            validate_class("landmarks", landmark)?;
        }

        if self.sticky_interval_ms == 0 {
            return Err(invalid("sticky_interval_ms", "must be positive"));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = self.patterns.iter().find(|pattern| !seen.insert(**pattern)) {
            return Err(invalid(
                "patterns",
                format!("pattern '{duplicate}' listed more than once"),
            ));
        }
        Ok(())
    }

    /// Sticky poll period.
    #[must_use]
    pub const fn sticky_interval(&self) -> Duration {
        Duration::from_millis(self.sticky_interval_ms)
    }
}

fn validate_class(field: &str, class: &str) -> ConfigResult<()> {
    Selector::try_class(class)
        .map(|_| ())
        .map_err(|err| invalid(field, err.to_string()))
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidField {
        section: SECTION.to_string(),
        field: field.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = CalciteConfig::from_json("{}").expect("defaults");
        assert_eq!(config, CalciteConfig::default());
        assert_eq!(config.patterns, Pattern::ALL.to_vec());
        assert_eq!(config.sticky_interval(), Duration::from_millis(10));
        assert_eq!(config.missing_target, MissingTargetPolicy::Report);
    }

    #[test]
    fn fields_override_defaults() {
        let config = CalciteConfig::from_json(
            r#"{
                "patterns": ["tabs", "expandingNav"],
                "active_class": "open",
                "missing_target": "ignore"
            }"#,
        )
        .expect("config");
        assert_eq!(config.patterns, vec![Pattern::Tabs, Pattern::ExpandingNav]);
        assert_eq!(config.active_class, "open");
        assert_eq!(config.missing_target, MissingTargetPolicy::Ignore);
        assert_eq!(config.landmarks, vec!["wrapper", "footer"]);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let err = CalciteConfig::from_json(r#"{"sticky_interval_ms": 0}"#).expect_err("zero");
        assert!(matches!(
            err,
            ConfigError::InvalidField { ref field, .. } if field == "sticky_interval_ms"
        ));

        let err = CalciteConfig::from_json(r#"{"active_class": "is active"}"#).expect_err("space");
        assert!(err.to_string().contains("class contains whitespace"));

        let err =
            CalciteConfig::from_json(r#"{"patterns": ["tabs", "tabs"]}"#).expect_err("duplicate");
        assert!(err.to_string().contains("pattern 'tabs' listed more than once"));
    }

    #[test]
    fn unknown_fields_and_patterns_fail_to_parse() {
        assert!(matches!(
            CalciteConfig::from_json(r#"{"colour": "red"}"#),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            CalciteConfig::from_json(r#"{"patterns": ["carousel"]}"#),
            Err(ConfigError::Parse { .. })
        ));
    }
}
