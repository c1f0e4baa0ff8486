//! Error types for DOM helpers.

use thiserror::Error;

/// Errors raised while building DOM queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// Selector input could not be used as a class selector.
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector {
        /// Offending selector input.
        selector: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

/// Convenience alias for DOM helper results.
pub type DomResult<T> = Result<T, DomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_selector_renders_reason() {
        let err = DomError::InvalidSelector {
            selector: "is active".to_string(),
            reason: "class contains whitespace",
        };
        assert_eq!(
            err.to_string(),
            "invalid selector 'is active': class contains whitespace"
        );
    }
}
