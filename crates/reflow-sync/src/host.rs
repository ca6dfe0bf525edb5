//! Capability implementations for the in-memory host document and sheet

use reflow_css::{CssError, RuleSheet};
use reflow_dom::{Document, NodeId};

use crate::ops::{ElementOps, RuleSheetOps};

impl ElementOps for Document {
    type Element = NodeId;

    fn parent_element(&self, element: NodeId) -> Option<NodeId> {
        self.tree()
            .parent(element)
            .filter(|&p| !self.is_layout_boundary(p))
            .filter(|&p| self.tree().element(p).is_some())
    }

    fn get_attribute(&self, element: NodeId, name: &str) -> Option<String> {
        self.tree().get_attribute(element, name).map(str::to_string)
    }

    fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) {
        if let Err(e) = self.tree_mut().set_attribute(element, name, value) {
            tracing::trace!("setAttribute({}) skipped: {}", name, e);
        }
    }

    fn remove_attribute(&mut self, element: NodeId, name: &str) {
        if let Err(e) = self.tree_mut().remove_attribute(element, name) {
            tracing::trace!("removeAttribute({}) skipped: {}", name, e);
        }
    }

    fn remove(&mut self, element: NodeId) {
        self.tree_mut().detach(element);
    }

    fn is_connected(&self, element: NodeId) -> bool {
        self.tree().is_connected(element)
    }
}

impl RuleSheetOps for RuleSheet {
    fn is_attached(&self) -> bool {
        RuleSheet::is_attached(self)
    }

    fn attach(&mut self) {
        RuleSheet::attach(self)
    }

    fn len(&self) -> usize {
        RuleSheet::len(self)
    }

    fn insert_rule(&mut self, rule: &str, index: usize) -> Result<usize, CssError> {
        RuleSheet::insert_rule(self, rule, index)
    }

    fn delete_rule(&mut self, index: usize) -> Result<(), CssError> {
        RuleSheet::delete_rule(self, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_walk_stops_at_body() {
        let mut doc = Document::default();
        let body = doc.body();
        let outer = doc.append_element(body, "div").unwrap();
        let inner = doc.append_element(outer, "div").unwrap();

        assert_eq!(doc.parent_element(inner), Some(outer));
        assert_eq!(doc.parent_element(outer), None);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut doc = Document::default();
        let body = doc.body();
        let div = doc.append_element(body, "div").unwrap();

        ElementOps::remove(&mut doc, div);
        ElementOps::remove(&mut doc, div);
        assert!(!ElementOps::is_connected(&doc, div));
    }
}
