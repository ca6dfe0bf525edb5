//! CSS Rule Parser using lightningcss
//!
//! Converts the single style rule lightningcss parses out of the rule text
//! into our own representation. The selector keeps the text as written so
//! the sheet can be searched by the exact selector that was inserted.

use lightningcss::declaration::DeclarationBlock;
use lightningcss::printer::PrinterOptions;
use lightningcss::properties::Property;
use lightningcss::rules::CssRule as ParsedRule;
use lightningcss::selector::SelectorList;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};

use crate::{CssError, CssRule, Declaration, Selector, Specificity};

/// CSS Parser
#[derive(Debug, Clone, Copy, Default)]
pub struct CssParser;

impl CssParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse text holding exactly one style rule
    pub fn parse_rule(&self, css: &str) -> Result<CssRule, CssError> {
        let stylesheet = StyleSheet::parse(css, ParserOptions::default()).map_err(|e| {
            CssError::Syntax {
                line: e.loc.as_ref().map_or(0, |loc| loc.line + 1),
                message: e.kind.to_string(),
            }
        })?;

        let style = match stylesheet.rules.0.as_slice() {
            [ParsedRule::Style(style)] => style,
            [] => return Err(syntax("no rule found")),
            [_] => return Err(syntax("only style rules are supported")),
            _ => return Err(syntax("expected exactly one rule")),
        };

        Ok(CssRule {
            text: css.to_string(),
            selector: Selector {
                text: selector_text(css).to_string(),
                specificity: self.convert_specificity(&style.selectors),
            },
            declarations: self.convert_declarations(&style.declarations)?,
        })
    }

    /// Highest specificity in the selector list
    fn convert_specificity(&self, selectors: &SelectorList) -> Specificity {
        selectors
            .0
            .iter()
            .map(|sel| unpack_specificity(sel.specificity()))
            .max()
            .unwrap_or_default()
    }

    fn convert_declarations(&self, declarations: &DeclarationBlock) -> Result<Vec<Declaration>, CssError> {
        let normal = declarations.declarations.iter().map(|d| (d, false));
        let important = declarations.important_declarations.iter().map(|d| (d, true));

        normal
            .chain(important)
            .map(|(decl, important)| self.convert_declaration(decl, important))
            .collect()
    }

    fn convert_declaration(&self, decl: &Property, important: bool) -> Result<Declaration, CssError> {
        let value = decl
            .value_to_css_string(PrinterOptions::default())
            .map_err(|e| syntax(&e.to_string()))?;

        Ok(Declaration {
            property: decl.property_id().name().to_ascii_lowercase(),
            value,
            important,
        })
    }
}

fn syntax(message: &str) -> CssError {
    CssError::Syntax {
        line: 1,
        message: message.to_string(),
    }
}

/// Selectors pack specificity as `a << 20 | b << 10 | c`
fn unpack_specificity(packed: u32) -> Specificity {
    const MASK: u32 = (1 << 10) - 1;
    Specificity(packed >> 20, (packed >> 10) & MASK, packed & MASK)
}

/// Prelude of an already validated rule: everything before the first `{`
/// outside a quoted attribute value
fn selector_text(css: &str) -> &str {
    let mut quote = None;
    for (i, c) in css.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (None, '"' | '\'') => quote = Some(c),
            (None, '{') => return css[..i].trim(),
            _ => {}
        }
    }
    css.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(css: &str) -> CssRule {
        CssParser::new().parse_rule(css).unwrap()
    }

    #[test]
    fn test_parse_rule_keeps_text() {
        let css = "#main .card{color:red !important; width: 10px}";
        let rule = parse(css);

        assert_eq!(rule.text, css);
        assert_eq!(rule.selector.text, "#main .card");
        assert_eq!(rule.declarations.len(), 2);
        assert_eq!(rule.declaration("color").unwrap().value, "red");
        assert!(rule.declaration("color").unwrap().important);
        assert_eq!(rule.declaration("width").unwrap().value, "10px");
        assert!(!rule.declaration("width").unwrap().important);
    }

    #[test]
    fn test_reject_two_rules() {
        let result = CssParser::new().parse_rule("a{color:red} b{color:blue}");
        assert!(matches!(result, Err(CssError::Syntax { .. })));
    }

    #[test]
    fn test_reject_bad_selector() {
        assert!(CssParser::new().parse_rule("#1bad{color:red}").is_err());
    }

    #[test]
    fn test_reject_doubled_priority() {
        assert!(CssParser::new().parse_rule(".a{color:red !important !important}").is_err());
    }

    #[test]
    fn test_semicolon_inside_string() {
        let rule = parse(r#".a{content:"x\";y"; color:red}"#);
        let properties: Vec<_> = rule.declarations.iter().map(|d| d.property.as_str()).collect();

        assert_eq!(properties, vec!["content", "color"]);
        assert_eq!(rule.declaration("color").unwrap().value, "red");
    }

    #[test]
    fn test_brace_inside_attribute_value() {
        let rule = parse(r#"[title="{x}"]{width:1px}"#);
        assert_eq!(rule.selector.text, r#"[title="{x}"]"#);
    }

    #[test]
    fn test_specificity() {
        let of = |css: &str| parse(css).selector.specificity;

        assert_eq!(of("div{}"), Specificity(0, 0, 1));
        assert_eq!(of("#a #b [x=\"a1\"][y=\"a1\"]{}"), Specificity(2, 2, 0));
        assert_eq!(of("ul li.item:hover::before{}"), Specificity(0, 2, 3));
        assert_eq!(of("a:not(#b){}"), Specificity(1, 0, 1));
        assert_eq!(of("a, #b{}"), Specificity(1, 0, 0));
    }
}
