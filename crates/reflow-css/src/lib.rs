//! Reflow CSS - Rule Sheet
//!
//! A CSSOM-style sheet that rules are inserted into and deleted from by
//! index, with rule text validated on insertion.

mod parser;
mod sheet;

pub use parser::CssParser;
pub use sheet::{RuleSheet, SheetStats};

/// Parse a single `selector{declarations}` rule
pub fn parse_rule(css: &str) -> Result<CssRule, CssError> {
    CssParser::new().parse_rule(css)
}

/// One style rule as stored in a sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    /// Rule text exactly as inserted
    pub text: String,
    pub selector: Selector,
    pub declarations: Vec<Declaration>,
}

impl CssRule {
    /// Look up a declaration by property name
    pub fn declaration(&self, property: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .rev()
            .find(|d| d.property.eq_ignore_ascii_case(property))
    }
}

/// CSS selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub text: String,
    pub specificity: Specificity,
}

/// Selector specificity (a, b, c)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// CSS declaration (property: value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// CSS error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CssError {
    #[error("Syntax error at line {line}: {message}")]
    Syntax { line: u32, message: String },
    #[error("Index {index} is out of range for a sheet of {len} rules")]
    IndexSize { index: usize, len: usize },
    #[error("Style sheet is not attached to a document")]
    Detached,
}
