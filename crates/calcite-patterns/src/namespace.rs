//! The `Calcite` namespace: one value per document exposing every pattern.

use calcite_dom::Dom;

use crate::binding::{Binding, Bindings};
use crate::config::CalciteConfig;
use crate::context::PatternContext;
use crate::error::{PatternError, PatternResult};
use crate::pattern::Pattern;
use crate::patterns::{
    StickyHandle, accordion, drawer, dropdown, expanding_nav, modal, site_search, sticky, tabs,
};

/// Library version string exposed to page scripts.
pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Pattern controllers bound to one document.
#[derive(Clone)]
pub struct Calcite<D: Dom> {
    ctx: PatternContext<D>,
}

impl<D: Dom> Calcite<D> {
    /// Namespace with the default configuration.
    #[must_use]
    pub fn new(dom: D) -> Self {
        Self {
            ctx: PatternContext::new(dom, CalciteConfig::default()),
        }
    }

    /// Namespace with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Config`] when `config` fails validation.
    pub fn with_config(dom: D, config: CalciteConfig) -> PatternResult<Self> {
        config.validate()?;
        Ok(Self {
            ctx: PatternContext::new(dom, config),
        })
    }

    /// Library version, `v` followed by the crate version.
    #[must_use]
    pub const fn version(&self) -> &'static str {
        VERSION
    }

    /// DOM backend.
    #[must_use]
    pub const fn dom(&self) -> &D {
        self.ctx.dom()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &CalciteConfig {
        self.ctx.config()
    }

    /// Shared controller context.
    #[must_use]
    pub const fn context(&self) -> &PatternContext<D> {
        &self.ctx
    }

    /// Collapsible sections.
    pub fn accordion(&self, root: Option<&D::Node>) -> Binding {
        accordion::bind(&self.ctx, root)
    }

    /// Dropdown menus.
    pub fn dropdown(&self, root: Option<&D::Node>) -> Binding {
        dropdown::bind(&self.ctx, root)
    }

    /// Off-canvas drawers.
    pub fn drawer(&self, root: Option<&D::Node>) -> Binding {
        drawer::bind(&self.ctx, root)
    }

    /// Expanding top-nav panels.
    pub fn expanding_nav(&self, root: Option<&D::Node>) -> Binding {
        expanding_nav::bind(&self.ctx, root)
    }

    /// Modal dialogs.
    pub fn modal(&self, root: Option<&D::Node>) -> Binding {
        modal::bind(&self.ctx, root)
    }

    /// Tab groups.
    pub fn tabs(&self, root: Option<&D::Node>) -> Binding {
        tabs::bind(&self.ctx, root)
    }

    /// Focus-driven site search.
    pub fn site_search(&self, root: Option<&D::Node>) -> Binding {
        site_search::bind(&self.ctx, root)
    }

    /// Sticky elements, owned by a binding.
    pub fn sticky(&self, root: Option<&D::Node>) -> Binding {
        sticky::bind(&self.ctx, root)
    }

    /// Sticky elements with direct control over the polling timer.
    #[must_use]
    pub fn sticky_handle(&self, root: Option<&D::Node>) -> StickyHandle<D> {
        StickyHandle::start(&self.ctx, root)
    }

    /// Run one pattern.
    pub fn run(&self, pattern: Pattern, root: Option<&D::Node>) -> Binding {
        match pattern {
            Pattern::Accordion => self.accordion(root),
            Pattern::Dropdown => self.dropdown(root),
            Pattern::Drawer => self.drawer(root),
            Pattern::ExpandingNav => self.expanding_nav(root),
            Pattern::Modal => self.modal(root),
            Pattern::Tabs => self.tabs(root),
            Pattern::SiteSearch => self.site_search(root),
            Pattern::Sticky => self.sticky(root),
        }
    }

    /// Run `patterns` in order against the whole document, or the configured
    /// list when `None`.
    pub fn init(&self, patterns: Option<&[Pattern]>) -> Bindings {
        let patterns = patterns.unwrap_or(self.ctx.config().patterns.as_slice());
        let mut bindings = Bindings::default();
        for pattern in patterns {
            bindings.push(self.run(*pattern, None));
        }
        tracing::info!(patterns = bindings.len(), version = VERSION, "calcite initialised");
        bindings
    }

    /// [`Calcite::init`] with pattern names as page scripts spell them.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::UnknownPattern`] for the first unrecognised
    /// name; nothing is bound in that case.
    pub fn init_named(&self, names: &[&str]) -> PatternResult<Bindings> {
        let patterns = names
            .iter()
            .map(|name| name.parse::<Pattern>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.init(Some(&patterns)))
    }

    /// Drain the unresolved-target reports collected so far.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<PatternError> {
        self.ctx.take_diagnostics()
    }
}

#[cfg(test)]
mod tests {
    use calcite_dom::MemoryDom;

    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn version_carries_prefix() {
        let calcite = Calcite::new(MemoryDom::new());
        assert!(calcite.version().starts_with('v'));
        assert_eq!(calcite.version(), concat!("v", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn init_defaults_to_configured_order() {
        let calcite = Calcite::new(MemoryDom::new());
        let bindings = calcite.init(None);
        assert_eq!(bindings.patterns(), Pattern::ALL.to_vec());
    }

    #[test]
    fn init_named_rejects_unknown_before_binding() {
        let dom = MemoryDom::new();
        dom.append_element(dom.body_element(), "a", "js-dropdown-toggle");
        let calcite = Calcite::new(dom.clone());

        let error = calcite.init_named(&["dropdown", "carousel"]).unwrap_err();
        assert!(matches!(error, PatternError::UnknownPattern { ref name } if name == "carousel"));
        assert_eq!(dom.listener_count(), 0);

        let bindings = calcite.init_named(&["tabs", "dropdown"]).unwrap();
        assert_eq!(bindings.patterns(), vec![Pattern::Tabs, Pattern::Dropdown]);
    }

    #[test]
    fn with_config_validates() {
        let config = CalciteConfig {
            sticky_interval_ms: 0,
            ..CalciteConfig::default()
        };
        let result = Calcite::with_config(MemoryDom::new(), config);
        assert!(matches!(
            result.err(),
            Some(PatternError::Config(ConfigError::InvalidField { .. }))
        ));
    }

    #[test]
    fn configured_pattern_list_is_used() {
        let config = CalciteConfig {
            patterns: vec![Pattern::Sticky, Pattern::Accordion],
            ..CalciteConfig::default()
        };
        let calcite = Calcite::with_config(MemoryDom::new(), config).unwrap();
        assert_eq!(
            calcite.init(None).patterns(),
            vec![Pattern::Sticky, Pattern::Accordion]
        );
    }
}
