//! Style Values
//!
//! Requested values, per-element intent records and applied declaration
//! sets. Declaration order follows first insertion so emitted rules read in
//! the order producers asked for them.

/// Desired state of one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleValue {
    /// Apply this value
    Set(String),
    /// Stop managing the property
    Delete,
}

impl StyleValue {
    pub fn set(value: impl Into<String>) -> Self {
        Self::Set(value.into())
    }

    pub fn as_set(&self) -> Option<&str> {
        match self {
            Self::Set(v) => Some(v),
            Self::Delete => None,
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Set(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Set(value)
    }
}

/// Everything requested for one element since the last flush
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementIntent {
    delete_all: bool,
    values: Vec<(String, StyleValue)>,
}

impl ElementIntent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value, overwriting an earlier one for the same property
    pub fn set(&mut self, property: &str, value: StyleValue) {
        match self.values.iter_mut().find(|(p, _)| p == property) {
            Some((_, v)) => *v = value,
            None => self.values.push((property.to_string(), value)),
        }
    }

    /// Drop the element's whole rule before applying any values
    pub fn mark_delete_all(&mut self) {
        self.delete_all = true;
    }

    pub fn delete_all(&self) -> bool {
        self.delete_all
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.values.iter().find(|(p, _)| p == property).map(|(_, v)| v)
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.values.iter().map(|(p, v)| (p.as_str(), v))
    }

    /// Whether any property-level request is present
    pub fn has_values(&self) -> bool {
        !self.values.is_empty()
    }

    /// Whether a concrete value is being set
    pub fn has_concrete_values(&self) -> bool {
        self.values.iter().any(|(_, v)| matches!(v, StyleValue::Set(_)))
    }
}

/// Ordered property → value set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    entries: Vec<(String, String)>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    /// Insert or overwrite in place, keeping the original position
    pub fn insert(&mut self, property: &str, value: &str) {
        match self.entries.iter_mut().find(|(p, _)| p == property) {
            Some((_, v)) => {
                v.clear();
                v.push_str(value);
            }
            None => self.entries.push((property.to_string(), value.to_string())),
        }
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(p, _)| p == property)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// True when applying `intent` would change nothing: every set value is
    /// already present and every deleted property already absent.
    pub fn satisfies(&self, intent: &ElementIntent) -> bool {
        intent.values().all(|(property, value)| match value {
            StyleValue::Set(v) => self.get(property) == Some(v.as_str()),
            StyleValue::Delete => !self.contains_key(property),
        })
    }

    /// Fold the intent's property requests into this set
    pub fn merge(&mut self, intent: &ElementIntent) {
        for (property, value) in intent.values() {
            match value {
                StyleValue::Set(v) => self.insert(property, v),
                StyleValue::Delete => {
                    self.remove(property);
                }
            }
        }
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Declarations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut decls = Self::new();
        for (k, v) in iter {
            decls.insert(k.as_ref(), v.as_ref());
        }
        decls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(values: &[(&str, StyleValue)]) -> ElementIntent {
        let mut intent = ElementIntent::new();
        for (p, v) in values {
            intent.set(p, v.clone());
        }
        intent
    }

    #[test]
    fn test_later_request_overwrites() {
        let i = intent(&[("color", "red".into()), ("width", "1px".into()), ("color", StyleValue::Delete)]);
        assert_eq!(i.get("color"), Some(&StyleValue::Delete));
        assert_eq!(i.values().count(), 2);
        assert!(i.has_concrete_values());
    }

    #[test]
    fn test_satisfies() {
        let applied: Declarations = [("color", "red")].into_iter().collect();

        assert!(applied.satisfies(&intent(&[("color", "red".into())])));
        assert!(applied.satisfies(&intent(&[("width", StyleValue::Delete)])));
        assert!(!applied.satisfies(&intent(&[("color", "blue".into())])));
        assert!(!applied.satisfies(&intent(&[("color", StyleValue::Delete)])));
    }

    #[test]
    fn test_merge_keeps_order() {
        let mut applied: Declarations = [("color", "red"), ("width", "1px")].into_iter().collect();
        applied.merge(&intent(&[("color", "blue".into()), ("height", "2px".into()), ("width", StyleValue::Delete)]));

        let entries: Vec<_> = applied.iter().collect();
        assert_eq!(entries, vec![("color", "blue"), ("height", "2px")]);
    }
}
