//! Rule Sheet
//!
//! The CSSOM surface of a `<style>` element the engine owns: an ordered rule
//! list edited by index. Detaching keeps the rules so a reattached sheet
//! resumes where it left off.

use crate::{CssError, CssParser, CssRule};

/// Rule sheet mutation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SheetStats {
    pub inserted: u64,
    pub deleted: u64,
    pub rejected: u64,
}

/// Programmatically owned style sheet
#[derive(Debug, Default)]
pub struct RuleSheet {
    rules: Vec<CssRule>,
    attached: bool,
    parser: CssParser,
    stats: SheetStats,
}

impl RuleSheet {
    /// Create a sheet not yet attached to a document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sheet that is already attached
    pub fn attached() -> Self {
        Self {
            attached: true,
            ..Self::default()
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn attach(&mut self) {
        if !self.attached {
            tracing::debug!("Attaching rule sheet ({} rules)", self.rules.len());
        }
        self.attached = true;
    }

    /// Simulates the host page pulling the `<style>` element out
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Insert a rule at `index`, shifting later rules up
    pub fn insert_rule(&mut self, css: &str, index: usize) -> Result<usize, CssError> {
        if !self.attached {
            return Err(CssError::Detached);
        }
        if index > self.rules.len() {
            return Err(CssError::IndexSize { index, len: self.rules.len() });
        }

        let rule = self.parser.parse_rule(css).inspect_err(|_| self.stats.rejected += 1)?;
        tracing::trace!("insertRule #{}: {}", index, css);
        self.rules.insert(index, rule);
        self.stats.inserted += 1;
        Ok(index)
    }

    /// Delete the rule at `index`, shifting later rules down
    pub fn delete_rule(&mut self, index: usize) -> Result<(), CssError> {
        if !self.attached {
            return Err(CssError::Detached);
        }
        if index >= self.rules.len() {
            return Err(CssError::IndexSize { index, len: self.rules.len() });
        }

        let rule = self.rules.remove(index);
        tracing::trace!("deleteRule #{}: {}", index, rule.text);
        self.stats.deleted += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CssRule> {
        self.rules.get(index)
    }

    pub fn rules(&self) -> &[CssRule] {
        &self.rules
    }

    /// Index of the first rule whose selector text equals `selector`
    pub fn find(&self, selector: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.selector.text == selector)
    }

    /// Serialized sheet, one rule per line
    pub fn to_css(&self) -> String {
        self.rules
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn stats(&self) -> &SheetStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete_by_index() {
        let mut sheet = RuleSheet::attached();
        sheet.insert_rule(".a{color:red}", 0).unwrap();
        sheet.insert_rule(".c{color:blue}", 1).unwrap();
        sheet.insert_rule(".b{color:green}", 1).unwrap();

        let selectors: Vec<_> = sheet.rules().iter().map(|r| r.selector.text.as_str()).collect();
        assert_eq!(selectors, vec![".a", ".b", ".c"]);

        sheet.delete_rule(0).unwrap();
        assert_eq!(sheet.find(".b"), Some(0));
        assert_eq!(sheet.stats().deleted, 1);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut sheet = RuleSheet::attached();
        assert_eq!(
            sheet.insert_rule(".a{color:red}", 1),
            Err(CssError::IndexSize { index: 1, len: 0 })
        );
        assert_eq!(sheet.delete_rule(0), Err(CssError::IndexSize { index: 0, len: 0 }));
    }

    #[test]
    fn test_detached_rejects_writes() {
        let mut sheet = RuleSheet::new();
        assert_eq!(sheet.insert_rule(".a{color:red}", 0), Err(CssError::Detached));

        sheet.attach();
        sheet.insert_rule(".a{color:red}", 0).unwrap();
        sheet.detach();
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.delete_rule(0), Err(CssError::Detached));
    }

    #[test]
    fn test_rejected_rule_counts() {
        let mut sheet = RuleSheet::attached();
        assert!(sheet.insert_rule("not a rule", 0).is_err());
        assert_eq!(sheet.stats().rejected, 1);
        assert!(sheet.is_empty());
    }
}
