//! Class selectors with an optional attribute filter.

use std::fmt::{self, Display, Formatter};

use crate::class::has_class_token;
use crate::error::{DomError, DomResult};

/// `.class` or `.class[attr="value"]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    class: String,
    attribute: Option<(String, String)>,
}

impl Selector {
    /// Selector for a known-good class name.
    #[must_use]
    pub fn class(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            attribute: None,
        }
    }

    /// Selector for a class name supplied from outside the crate.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::InvalidSelector`] when the class is empty or contains
    /// whitespace.
    pub fn try_class(class: &str) -> DomResult<Self> {
        if class.is_empty() {
            return Err(DomError::InvalidSelector {
                selector: class.to_string(),
                reason: "class is empty",
            });
        }
        if class.chars().any(char::is_whitespace) {
            return Err(DomError::InvalidSelector {
                selector: class.to_string(),
                reason: "class contains whitespace",
            });
        }
        Ok(Self::class(class))
    }

    /// Narrow the selector to elements whose `name` attribute equals `value`.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attribute = Some((name.into(), value.into()));
        self
    }

    /// Class the selector matches.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class
    }

    /// Attribute filter, if any.
    #[must_use]
    pub fn attribute(&self) -> Option<(&str, &str)> {
        self.attribute
            .as_ref()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Whether an element with the given class attribute and attribute lookup
    /// matches.
    pub fn matches<F>(&self, class_name: &str, attribute: F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        has_class_token(class_name, &self.class)
            && self
                .attribute()
                .is_none_or(|(name, value)| attribute(name).as_deref() == Some(value))
    }

    /// CSS rendering with identifiers and the attribute value escaped.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = format!(".{}", escape_ident(&self.class));
        if let Some((name, value)) = self.attribute() {
            css.push('[');
            css.push_str(&escape_ident(name));
            css.push_str("=\"");
            for ch in value.chars() {
                if matches!(ch, '"' | '\\') {
                    css.push('\\');
                }
                css.push(ch);
            }
            css.push_str("\"]");
        }
        css
    }
}

impl Display for Selector {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.to_css())
    }
}

fn escape_ident(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    for ch in ident.chars() {
        if !(ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_')) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
