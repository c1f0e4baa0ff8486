//! Error types for pattern binding and bootstrap.

use thiserror::Error;

use crate::config::ConfigError;
use crate::pattern::Pattern;

/// Primary error type for the widget patterns.
#[derive(Debug, Error)]
pub enum PatternError {
    /// A `data-*` id on a toggle did not resolve to an element.
    #[error("{pattern} target not found for '{selector}'")]
    TargetNotFound {
        /// Pattern that performed the lookup.
        pattern: Pattern,
        /// CSS selector that matched nothing.
        selector: String,
    },
    /// Bootstrap was asked for a pattern that does not exist.
    #[error("unknown pattern '{name}'")]
    UnknownPattern {
        /// Name supplied by the caller.
        name: String,
    },
    /// A tab had no content pane at its index.
    #[error("tab group has no content pane at index {index} ({panes} panes)")]
    MissingPane {
        /// Index of the selected tab.
        index: usize,
        /// Number of panes in the group.
        panes: usize,
    },
    /// Configuration failed to parse or validate.
    #[error("invalid configuration")]
    Config(#[from] ConfigError),
}

/// Convenience alias for pattern results.
pub type PatternResult<T> = Result<T, PatternError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_not_found_names_pattern_and_selector() {
        let err = PatternError::TargetNotFound {
            pattern: Pattern::Drawer,
            selector: ".js-drawer[data-drawer=\"nav\"]".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "drawer target not found for '.js-drawer[data-drawer=\"nav\"]'"
        );
    }

    #[test]
    fn config_errors_convert() {
        let err: PatternError = ConfigError::InvalidField {
            section: "patterns".to_string(),
            field: "sticky_interval_ms".to_string(),
            message: "must be positive".to_string(),
        }
        .into();
        assert!(matches!(err, PatternError::Config(_)));
    }
}
