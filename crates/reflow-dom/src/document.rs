//! Document - High-level document API

use crate::{ComplexSelector, DomError, DomTree, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with an html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh nodes under the document node cannot violate the hierarchy.
        let _ = tree.append_child(NodeId::ROOT, html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Create an element and append it under `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> Result<NodeId, DomError> {
        let id = self.tree.create_element(tag);
        self.tree.append_child(parent, id)?;
        Ok(id)
    }

    /// Create an element with an `id` attribute and append it under `parent`
    pub fn append_element_with_id(
        &mut self,
        parent: NodeId,
        tag: &str,
        id: &str,
    ) -> Result<NodeId, DomError> {
        let node = self.append_element(parent, tag)?;
        self.tree.set_attribute(node, "id", id)?;
        Ok(node)
    }

    /// <body> and <html>: where ancestor walks for selector prefixes stop
    pub fn is_layout_boundary(&self, id: NodeId) -> bool {
        id == self.body_element || id == self.html_element
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(NodeId::ROOT)
            .into_iter()
            .find(|&n| self.tree.element(n).and_then(|e| e.id()) == Some(id))
    }

    /// All connected elements matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(selector) = ComplexSelector::parse(selector) else {
            tracing::debug!("Unsupported selector: {}", selector);
            return Vec::new();
        };
        self.tree
            .descendants(NodeId::ROOT)
            .into_iter()
            .filter(|&n| selector.matches(&self.tree, n))
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton() {
        let doc = Document::default();
        assert_eq!(doc.url(), "about:blank");
        assert_eq!(doc.tree().parent(doc.body()), Some(doc.document_element()));
        assert_eq!(doc.tree().parent(doc.head()), Some(doc.document_element()));
        assert!(doc.is_layout_boundary(doc.body()));
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::default();
        let body = doc.body();
        let main = doc.append_element_with_id(body, "main", "content").unwrap();

        assert_eq!(doc.get_element_by_id("content"), Some(main));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }

    #[test]
    fn test_query_ignores_detached() {
        let mut doc = Document::default();
        let body = doc.body();
        let a = doc.append_element(body, "div").unwrap();
        let b = doc.append_element(body, "div").unwrap();
        doc.tree_mut().detach(b);

        assert_eq!(doc.query_selector_all("div"), vec![a]);
        assert!(doc.query_selector_all("div > p").is_empty());
    }
}
