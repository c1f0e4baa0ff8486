//! Page-lifetime owner of the namespace and everything it has bound.
//!
//! Page scripts call controllers without keeping handles, so the runtime keeps
//! every [`Binding`] alive until [`Runtime::dispose`] or reconfiguration.

use calcite_dom::Dom;
use calcite_patterns::{Binding, Bindings, Calcite, CalciteConfig, Pattern, PatternResult};

/// Namespace plus the bindings created through it.
pub struct Runtime<D: Dom> {
    calcite: Calcite<D>,
    bindings: Vec<Binding>,
    boots: Vec<Bindings>,
}

impl<D: Dom> Runtime<D> {
    /// Runtime with the default configuration.
    #[must_use]
    pub fn new(dom: D) -> Self {
        Self {
            calcite: Calcite::new(dom),
            bindings: Vec::new(),
            boots: Vec::new(),
        }
    }

    /// Current namespace.
    #[must_use]
    pub const fn calcite(&self) -> &Calcite<D> {
        &self.calcite
    }

    /// Replace the configuration from a JSON document. Everything bound under
    /// the previous configuration is released first.
    ///
    /// # Errors
    ///
    /// Returns the parse or validation error; the running namespace is kept.
    pub fn configure(&mut self, document: &str) -> PatternResult<()> {
        let config = CalciteConfig::from_json(document)?;
        let calcite = Calcite::with_config(self.calcite.dom().clone(), config)?;
        self.dispose();
        self.calcite = calcite;
        tracing::debug!("calcite reconfigured");
        Ok(())
    }

    /// Run one pattern and keep its binding. Returns the listeners installed.
    pub fn run(&mut self, pattern: Pattern, root: Option<&D::Node>) -> usize {
        let binding = self.calcite.run(pattern, root);
        let listeners = binding.listener_count();
        self.bindings.push(binding);
        listeners
    }

    /// Bootstrap by name, or the configured list when `names` is `None`.
    /// Returns the patterns that ran.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPattern` when a name is not recognised; nothing is
    /// bound in that case.
    pub fn init(&mut self, names: Option<&[String]>) -> PatternResult<Vec<Pattern>> {
        let bindings = match names {
            Some(names) => {
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                self.calcite.init_named(&names)?
            }
            None => self.calcite.init(None),
        };
        let patterns = bindings.patterns();
        self.boots.push(bindings);
        Ok(patterns)
    }

    /// Number of live bindings, counting each bootstrap's patterns.
    #[must_use]
    pub fn live_bindings(&self) -> usize {
        self.bindings.len() + self.boots.iter().map(Bindings::len).sum::<usize>()
    }

    /// Release everything bound so far, most recent first.
    pub fn dispose(&mut self) {
        while let Some(bindings) = self.boots.pop() {
            bindings.dispose();
        }
        while let Some(binding) = self.bindings.pop() {
            binding.dispose();
        }
    }
}

impl<D: Dom> Drop for Runtime<D> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use calcite_dom::MemoryDom;
    use calcite_patterns::PatternError;
    use calcite_test_support::assert::is_active;
    use calcite_test_support::fixtures;

    use super::*;

    #[test]
    fn run_keeps_bindings_until_dispose() {
        let page = fixtures::page();
        let accordion = fixtures::accordion(&page.dom, page.wrapper, 2, &[]);
        let mut runtime = Runtime::new(page.dom.clone());

        assert_eq!(runtime.run(Pattern::Accordion, None), 4);
        page.dom.click(accordion.headers[0]);
        assert!(is_active(&page.dom, accordion.sections[0]));

        runtime.dispose();
        assert_eq!(runtime.live_bindings(), 0);
        assert_eq!(page.dom.listener_count(), 0);
    }

    #[test]
    fn init_by_name_and_reject_unknown() {
        let page = fixtures::page();
        fixtures::tabs(&page.dom, page.wrapper, 2, 2);
        let mut runtime = Runtime::new(page.dom.clone());

        let names = vec!["tabs".to_string(), "modal".to_string()];
        assert_eq!(
            runtime.init(Some(names.as_slice())).unwrap(),
            vec![Pattern::Tabs, Pattern::Modal]
        );
        assert_eq!(runtime.live_bindings(), 2);

        let bad = vec!["tabs".to_string(), "slider".to_string()];
        assert!(matches!(
            runtime.init(Some(bad.as_slice())),
            Err(PatternError::UnknownPattern { .. })
        ));
        assert_eq!(runtime.live_bindings(), 2);
    }

    #[test]
    fn configure_rebinds_under_new_config() {
        let page = fixtures::page();
        let accordion = fixtures::accordion(&page.dom, page.wrapper, 1, &[]);
        let mut runtime = Runtime::new(page.dom.clone());
        runtime.init(None).unwrap();

        runtime
            .configure(r#"{"active_class":"open","patterns":["accordion"]}"#)
            .unwrap();
        assert_eq!(page.dom.listener_count(), 0);
        assert_eq!(runtime.init(None).unwrap(), vec![Pattern::Accordion]);

        page.dom.click(accordion.headers[0]);
        assert!(calcite_dom::has_class(&page.dom, &accordion.sections[0], "open"));
    }

    #[test]
    fn bad_configuration_keeps_running_namespace() {
        let mut runtime = Runtime::new(MemoryDom::new());
        assert!(matches!(
            runtime.configure(r#"{"sticky_interval_ms":0}"#),
            Err(PatternError::Config(_))
        ));
        assert!(runtime.configure("not json").is_err());
        assert_eq!(runtime.calcite().config(), &CalciteConfig::default());
    }
}
