//! Element Query
//!
//! Selector matching for the subset used to address elements from rule
//! text: type, `*`, `#id`, `.class`, `[attr]`, `[attr=value]` compounds
//! joined by descendant combinators.

use crate::{DomTree, ElementData, NodeId};

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Universal,
    Tag(String),
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
}

impl SimpleSelector {
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Universal => true,
            Self::Tag(tag) => element.tag_name.eq_ignore_ascii_case(tag),
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Class(class) => element.has_class(class),
            Self::Attribute { name, value: None } => element.attrs.has(name),
            Self::Attribute { name, value: Some(v) } => element.attrs.get(name) == Some(v.as_str()),
        }
    }
}

/// A run of simple selectors with no combinator between them
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    pub parts: Vec<SimpleSelector>,
}

impl CompoundSelector {
    /// Parse one compound such as `div#main[data-x="1"]`
    pub fn parse(s: &str) -> Option<Self> {
        let chars: Vec<char> = s.chars().collect();
        let mut parts = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '*' => {
                    parts.push(SimpleSelector::Universal);
                    i += 1;
                }
                '#' | '.' => {
                    let (ident, next) = read_ident(&chars, i + 1);
                    if ident.is_empty() {
                        return None;
                    }
                    parts.push(if chars[i] == '#' {
                        SimpleSelector::Id(ident)
                    } else {
                        SimpleSelector::Class(ident)
                    });
                    i = next;
                }
                '[' => {
                    let close = chars[i..].iter().position(|&c| c == ']')? + i;
                    let inner: String = chars[i + 1..close].iter().collect();
                    parts.push(parse_attribute(&inner)?);
                    i = close + 1;
                }
                c if is_ident_char(c) => {
                    let (ident, next) = read_ident(&chars, i);
                    parts.push(SimpleSelector::Tag(ident));
                    i = next;
                }
                _ => return None,
            }
        }

        (!parts.is_empty()).then_some(Self { parts })
    }

    pub fn matches(&self, element: &ElementData) -> bool {
        self.parts.iter().all(|p| p.matches(element))
    }
}

/// Compounds joined by descendant combinators, outermost first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
}

impl ComplexSelector {
    pub fn parse(s: &str) -> Option<Self> {
        let compounds = split_outside_brackets(s.trim())
            .into_iter()
            .map(|c| CompoundSelector::parse(&c))
            .collect::<Option<Vec<_>>>()?;
        (!compounds.is_empty()).then_some(Self { compounds })
    }

    /// Match against `node`, resolving descendant combinators upward
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some((subject, rest)) = self.compounds.split_last() else {
            return false;
        };
        if !tree.element(node).is_some_and(|e| subject.matches(e)) {
            return false;
        }

        // With descendant-only chains the nearest matching ancestor is always
        // the best candidate for each compound.
        let mut ancestors = tree.ancestors(node);
        rest.iter().rev().all(|compound| {
            ancestors.any(|a| tree.element(a).is_some_and(|e| compound.matches(e)))
        })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn read_ident(chars: &[char], start: usize) -> (String, usize) {
    let mut end = start;
    while end < chars.len() && is_ident_char(chars[end]) {
        end += 1;
    }
    (chars[start..end].iter().collect(), end)
}

fn parse_attribute(inner: &str) -> Option<SimpleSelector> {
    let (name, value) = match inner.split_once('=') {
        Some((name, value)) => {
            let value = value.trim();
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (name.trim(), Some(unquoted.to_string()))
        }
        None => (inner.trim(), None),
    };
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return None;
    }
    Some(SimpleSelector::Attribute {
        name: name.to_string(),
        value,
    })
}

fn split_outside_brackets(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in s.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, c) if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound() {
        let compound = CompoundSelector::parse(r#"div#main.wide[data-x="a1"][hidden]"#).unwrap();
        assert_eq!(
            compound.parts,
            vec![
                SimpleSelector::Tag("div".into()),
                SimpleSelector::Id("main".into()),
                SimpleSelector::Class("wide".into()),
                SimpleSelector::Attribute { name: "data-x".into(), value: Some("a1".into()) },
                SimpleSelector::Attribute { name: "hidden".into(), value: None },
            ]
        );
    }

    #[test]
    fn test_parse_rejects_combinators() {
        assert!(CompoundSelector::parse("div>p").is_none());
        assert!(CompoundSelector::parse("#").is_none());
    }

    #[test]
    fn test_quoted_space_stays_in_compound() {
        let complex = ComplexSelector::parse(r#"#a [title="two words"]"#).unwrap();
        assert_eq!(complex.compounds.len(), 2);
    }

    #[test]
    fn test_descendant_matching() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("section");
        let middle = tree.create_element("div");
        let leaf = tree.create_element("p");
        tree.append_child(tree.root(), outer).unwrap();
        tree.append_child(outer, middle).unwrap();
        tree.append_child(middle, leaf).unwrap();
        tree.set_attribute(outer, "id", "page").unwrap();
        tree.set_attribute(leaf, "data-k", "a3").unwrap();

        let hit = ComplexSelector::parse(r#"#page [data-k="a3"]"#).unwrap();
        let miss = ComplexSelector::parse(r#"#other [data-k="a3"]"#).unwrap();
        assert!(hit.matches(&tree, leaf));
        assert!(!hit.matches(&tree, middle));
        assert!(!miss.matches(&tree, leaf));
    }
}
