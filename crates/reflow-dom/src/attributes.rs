//! Element Attributes
//!
//! Attribute manipulation: get, set, remove, has.

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn is_id(&self) -> bool {
        self.name == "id"
    }
}

/// Named node map (attribute collection)
///
/// Keeps source order. Attribute names are matched ASCII case-insensitively,
/// as HTML does.
#[derive(Debug, Clone, Default)]
pub struct NamedNodeMap {
    attributes: Vec<Attr>,
}

impl NamedNodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Get attribute by index
    pub fn item(&self, index: usize) -> Option<&Attr> {
        self.attributes.get(index)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Get attribute value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.attributes[i].value.as_str())
    }

    /// Check whether an attribute is present
    pub fn has(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Set an attribute, replacing the value in place if it exists
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.position(name) {
            Some(i) => self.attributes[i].value = value,
            None => self.attributes.push(Attr::new(name.to_ascii_lowercase(), value)),
        }
    }

    /// Remove an attribute, returning the old value
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|i| self.attributes.remove(i).value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }
}
