//! Pattern identifiers and the default bootstrap order.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PatternError;

/// Widget patterns the namespace can bind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pattern {
    /// Collapsible sections.
    Accordion,
    /// Menus dismissed by outside clicks.
    Dropdown,
    /// Off-canvas panels.
    Drawer,
    /// Panels expanding under the top nav.
    ExpandingNav,
    /// Dialogs.
    Modal,
    /// Tabbed content panes.
    Tabs,
    /// Focus-driven search field in the top nav.
    SiteSearch,
    /// Elements pinned once scrolled past.
    Sticky,
}

impl Pattern {
    /// Every pattern in bootstrap order.
    pub const ALL: [Self; 8] = [
        Self::Accordion,
        Self::Dropdown,
        Self::Drawer,
        Self::ExpandingNav,
        Self::Modal,
        Self::Tabs,
        Self::SiteSearch,
        Self::Sticky,
    ];

    /// Name used by page scripts and configuration.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Accordion => "accordion",
            Self::Dropdown => "dropdown",
            Self::Drawer => "drawer",
            Self::ExpandingNav => "expandingNav",
            Self::Modal => "modal",
            Self::Tabs => "tabs",
            Self::SiteSearch => "siteSearch",
            Self::Sticky => "sticky",
        }
    }
}

impl Display for Pattern {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.name() == value)
            .ok_or_else(|| PatternError::UnknownPattern {
                name: value.to_string(),
            })
    }
}
