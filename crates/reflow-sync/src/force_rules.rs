//! Force-Rule Registry
//!
//! Bulk overrides keyed by arbitrary selector text instead of element
//! identity. Rules live in a sheet of their own and are written at once,
//! outside the flush cycle. Registering a selector again replaces its rule.

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::ops::RuleSheetOps;
use crate::selector::SelectorSynthesizer;

/// One registered override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForceRule {
    pub selector: String,
    pub properties: Vec<String>,
    pub declarations: String,
}

/// Selector-keyed override rules; entry `i` is rule `i` of the sheet
#[derive(Debug)]
pub struct ForceRuleRegistry<S> {
    sheet: S,
    entries: Vec<ForceRule>,
    synth: SelectorSynthesizer,
}

impl<S: RuleSheetOps> ForceRuleRegistry<S> {
    /// Create a registry with the default configuration
    pub fn new(sheet: S) -> Self {
        Self::build(sheet, &SyncConfig::default())
    }

    /// Create a registry whose declarations carry the configured priority
    pub fn with_config(sheet: S, config: &SyncConfig) -> Result<Self, SyncError> {
        config.validate()?;
        Ok(Self::build(sheet, config))
    }

    fn build(sheet: S, config: &SyncConfig) -> Self {
        Self {
            sheet,
            entries: Vec::new(),
            synth: SelectorSynthesizer::new(config),
        }
    }

    fn ensure_attached(&mut self) {
        if !self.sheet.is_attached() {
            tracing::warn!("Force-rule sheet detached, reattaching");
            self.sheet.attach();
        }
    }

    /// Register `selector`, replacing any rule it already has
    ///
    /// Returns whether the new rule made it into the sheet.
    pub fn append_rule(&mut self, selector: &str, declarations: &[(&str, &str)]) -> bool {
        if self.get(selector).is_some() && !self.remove_rule(selector) {
            return false;
        }
        self.ensure_attached();

        let block = self.synth.declaration_block(declarations.iter().copied());
        let text = format!("{selector}{{{block}}}");

        let position = self.entries.len();
        match self.sheet.insert_rule(&text, position) {
            Ok(_) => {
                tracing::debug!("Force rule #{}: {}", position, text);
                self.entries.push(ForceRule {
                    selector: selector.to_string(),
                    properties: declarations.iter().map(|(p, _)| p.to_string()).collect(),
                    declarations: block,
                });
                true
            }
            Err(e) => {
                tracing::warn!("Force rule for {:?} rejected: {}", selector, e);
                false
            }
        }
    }

    /// Drop the rule registered for `selector`
    ///
    /// The entry is kept when the sheet refuses the delete, so entry `i`
    /// still names rule `i`.
    pub fn remove_rule(&mut self, selector: &str) -> bool {
        let Some(position) = self.entries.iter().position(|r| r.selector == selector) else {
            return false;
        };
        self.ensure_attached();

        match self.sheet.delete_rule(position) {
            Ok(()) => {
                self.entries.remove(position);
                true
            }
            Err(e) => {
                tracing::warn!("Failed to delete force rule #{}: {}", position, e);
                false
            }
        }
    }

    pub fn get(&self, selector: &str) -> Option<&ForceRule> {
        self.entries.iter().find(|r| r.selector == selector)
    }

    /// Entries in sheet order
    pub fn rules(&self) -> &[ForceRule] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every registered rule, last first; stops at the first rule the
    /// sheet refuses to delete
    pub fn clear(&mut self) {
        while let Some(rule) = self.entries.last() {
            let selector = rule.selector.clone();
            if !self.remove_rule(&selector) {
                break;
            }
        }
    }

    pub fn sheet(&self) -> &S {
        &self.sheet
    }

    /// Host-side access, for simulating the page detaching the sheet
    pub fn sheet_mut(&mut self) -> &mut S {
        &mut self.sheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_css::RuleSheet;

    #[test]
    fn test_replace_by_selector() {
        let mut registry = ForceRuleRegistry::new(RuleSheet::new());
        assert!(registry.append_rule(".ad", &[("display", "none")]));
        assert!(registry.append_rule("#main", &[("width", "100%"), ("max-width", "none")]));
        assert!(registry.append_rule(".ad", &[("visibility", "hidden")]));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.rules()[0].selector, "#main");
        assert_eq!(registry.rules()[1].properties, vec!["visibility"]);

        let sheet = registry.sheet();
        assert!(sheet.is_attached());
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rules()[1].text, ".ad{visibility:hidden !important}");
    }

    #[test]
    fn test_rejected_selector_leaves_registry_consistent() {
        let mut registry = ForceRuleRegistry::new(RuleSheet::attached());
        registry.append_rule(".ok", &[("color", "red")]);

        assert!(!registry.append_rule("#1bad", &[("color", "red")]));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.sheet().len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut registry = ForceRuleRegistry::new(RuleSheet::attached());
        registry.append_rule(".a", &[("color", "red")]);
        registry.append_rule(".b", &[("color", "red")]);
        registry.append_rule(".c", &[("color", "red")]);

        assert!(registry.remove_rule(".b"));
        assert!(!registry.remove_rule(".b"));
        assert_eq!(registry.sheet().rules()[1].selector.text, ".c");
        assert!(registry.get(".c").is_some());

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.sheet().is_empty());
    }

    fn sheet_selectors(registry: &ForceRuleRegistry<RuleSheet>) -> Vec<&str> {
        registry.sheet().rules().iter().map(|r| r.selector.text.as_str()).collect()
    }

    #[test]
    fn test_remove_on_detached_sheet() {
        let mut registry = ForceRuleRegistry::new(RuleSheet::new());
        registry.append_rule(".a", &[("color", "red")]);
        registry.append_rule(".b", &[("color", "red")]);

        registry.sheet_mut().detach();
        assert!(registry.remove_rule(".a"));
        assert!(registry.sheet().is_attached());

        registry.append_rule(".c", &[("color", "red")]);
        assert!(registry.remove_rule(".c"));

        assert_eq!(sheet_selectors(&registry), vec![".b"]);
        assert_eq!(registry.rules()[0].selector, ".b");

        registry.sheet_mut().detach();
        registry.clear();
        assert!(registry.sheet().is_empty());
    }

    /// Sheet that accepts inserts but refuses every delete
    #[derive(Default)]
    struct StuckSheet(RuleSheet);

    impl RuleSheetOps for StuckSheet {
        fn is_attached(&self) -> bool {
            self.0.is_attached()
        }

        fn attach(&mut self) {
            self.0.attach();
        }

        fn len(&self) -> usize {
            self.0.len()
        }

        fn insert_rule(&mut self, rule: &str, index: usize) -> Result<usize, reflow_css::CssError> {
            self.0.insert_rule(rule, index)
        }

        fn delete_rule(&mut self, index: usize) -> Result<(), reflow_css::CssError> {
            Err(reflow_css::CssError::IndexSize { index, len: self.0.len() })
        }
    }

    #[test]
    fn test_refused_delete_keeps_entry() {
        let mut registry = ForceRuleRegistry::new(StuckSheet::default());
        registry.append_rule(".a", &[("color", "red")]);
        registry.append_rule(".b", &[("color", "red")]);

        assert!(!registry.remove_rule(".a"));
        assert!(!registry.append_rule(".a", &[("color", "blue")]));
        registry.clear();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.sheet().len(), 2);
        assert_eq!(registry.get(".a").unwrap().declarations, "color:red !important");
    }

    #[test]
    fn test_configured_priority() {
        let config = SyncConfig {
            priority: String::new(),
            ..SyncConfig::default()
        };
        let mut registry = ForceRuleRegistry::with_config(RuleSheet::new(), &config).unwrap();
        registry.append_rule(".a", &[("color", "red"), ("width", "1px")]);

        assert_eq!(registry.sheet().rules()[0].text, ".a{color:red; width:1px}");
        assert!(registry.sheet().rules()[0].declarations.iter().all(|d| !d.important));
    }
}
