//! Override Guard
//!
//! The host page (or another layer) can tag an element with the properties
//! it owns. Requests for those properties are dropped before they reach the
//! Intent Cache.

use crate::ops::ElementOps;

/// Reads per-element forced-property tags
#[derive(Debug, Clone)]
pub struct OverrideGuard {
    attribute: String,
}

impl OverrideGuard {
    /// Guard reading the list from `attribute`
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Properties the element's owner has claimed
    pub fn forced_properties<D: ElementOps>(&self, dom: &D, element: D::Element) -> Vec<String> {
        dom.get_attribute(element, &self.attribute)
            .map(|list| parse_forced_list(&list).map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Whether `property` is off limits on `element`
    pub fn is_forced<D: ElementOps>(&self, dom: &D, element: D::Element, property: &str) -> bool {
        dom.get_attribute(element, &self.attribute)
            .is_some_and(|list| parse_forced_list(&list).any(|p| p.eq_ignore_ascii_case(property)))
    }
}

/// Split a tag value on commas and whitespace
pub fn parse_forced_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|p| !p.is_empty())
}
