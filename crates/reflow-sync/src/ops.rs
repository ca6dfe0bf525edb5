//! Host Capabilities
//!
//! The only two ways the engine reaches outside itself: reading and tagging
//! elements, and editing the rule sheet it owns.

use std::fmt::Debug;
use std::hash::Hash;

use reflow_css::CssError;

/// Element access the engine needs from the host document
pub trait ElementOps {
    /// Opaque element identity, used as a cache key
    type Element: Copy + Eq + Hash + Debug;

    /// Parent element, or `None` once the walk reaches the body boundary
    /// (or there is no element parent at all).
    fn parent_element(&self, element: Self::Element) -> Option<Self::Element>;

    fn get_attribute(&self, element: Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: Self::Element, name: &str, value: &str);

    fn remove_attribute(&mut self, element: Self::Element, name: &str);

    /// Detach the element from its document. Must tolerate repeated calls.
    fn remove(&mut self, element: Self::Element);

    fn is_connected(&self, element: Self::Element) -> bool;

    /// The element's `id`, if it has one
    fn element_id(&self, element: Self::Element) -> Option<String> {
        self.get_attribute(element, "id")
    }
}

/// CSSOM access to the engine-owned rule sheet
pub trait RuleSheetOps {
    fn is_attached(&self) -> bool;

    /// (Re)insert the sheet's owner node into the document
    fn attach(&mut self);

    /// Number of live rules
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert_rule(&mut self, rule: &str, index: usize) -> Result<usize, CssError>;

    fn delete_rule(&mut self, index: usize) -> Result<(), CssError>;
}
