//! Selector Synthesizer
//!
//! Addresses one element durably without trusting its class or id. The
//! element carries several engine-owned attributes that all hold the same
//! `prefix + slot` value, and the selector demands every one of them. Ids
//! of ancestors (and of the element itself) are prepended to lift the
//! rule's specificity above ordinary page rules.

use crate::config::SyncConfig;
use crate::ops::ElementOps;
use crate::slots::SlotId;
use crate::value::Declarations;

/// Builds selectors, fingerprints and rule text
#[derive(Debug, Clone)]
pub struct SelectorSynthesizer {
    attributes: Vec<String>,
    slot_prefix: String,
    priority: String,
}

impl SelectorSynthesizer {
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            attributes: config.fingerprint_attributes.clone(),
            slot_prefix: config.slot_prefix.clone(),
            priority: config.priority.clone(),
        }
    }

    /// Fingerprint attribute names
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Value every fingerprint attribute carries for `slot`
    pub fn fingerprint_value(&self, slot: SlotId) -> String {
        format!("{}{}", self.slot_prefix, slot)
    }

    /// Attribute part of the selector: `[a="a3"][b="a3"]...`
    pub fn fingerprint(&self, slot: SlotId) -> String {
        let value = self.fingerprint_value(slot);
        self.attributes
            .iter()
            .map(|name| format!("[{name}=\"{value}\"]"))
            .collect()
    }

    /// Full selector for `element` rendered by `slot`
    pub fn selector<D: ElementOps>(&self, dom: &D, element: D::Element, slot: SlotId) -> String {
        let mut ancestor_ids = Vec::new();
        let mut current = dom.parent_element(element);
        while let Some(ancestor) = current {
            if let Some(id) = dom.element_id(ancestor).filter(|id| is_valid_ident(id)) {
                ancestor_ids.push(id);
            }
            current = dom.parent_element(ancestor);
        }

        let mut selector = String::new();
        for id in ancestor_ids.iter().rev() {
            selector.push('#');
            selector.push_str(id);
            selector.push(' ');
        }
        if let Some(id) = dom.element_id(element).filter(|id| is_valid_ident(id)) {
            selector.push('#');
            selector.push_str(&id);
        }
        selector.push_str(&self.fingerprint(slot));
        selector
    }

    /// Write the fingerprint attributes onto `element`
    pub fn apply_fingerprint<D: ElementOps>(&self, dom: &mut D, element: D::Element, slot: SlotId) {
        let value = self.fingerprint_value(slot);
        for name in &self.attributes {
            dom.set_attribute(element, name, &value);
        }
    }

    /// Remove the fingerprint attributes from `element`
    pub fn strip_fingerprint<D: ElementOps>(&self, dom: &mut D, element: D::Element) {
        for name in &self.attributes {
            dom.remove_attribute(element, name);
        }
    }

    /// `prop:value !important; ...`, or without the marker when the
    /// configured priority is empty
    pub fn declaration_block<'a>(&self, declarations: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
        declarations
            .into_iter()
            .map(|(property, value)| match self.priority.as_str() {
                "" => format!("{property}:{value}"),
                priority => format!("{property}:{value} {priority}"),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// `selector{declarations}`
    pub fn rule_text(&self, selector: &str, applied: &Declarations) -> String {
        format!("{selector}{{{}}}", self.declaration_block(applied.iter()))
    }
}

/// Whether `s` can be written as a bare CSS identifier (`#s`, `[s=...]`)
/// without escaping.
pub fn is_valid_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if first.is_ascii_digit() {
        return false;
    }
    if first == '-' && s[1..].starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    if s == "-" {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii())
}
