//! Intent Cache
//!
//! Per-cycle buffer of element → requested values. Iteration follows the
//! order in which each element was first requested during the cycle.

use std::collections::HashMap;
use std::hash::Hash;

use crate::value::ElementIntent;

/// Requests accumulated since the last flush
#[derive(Debug)]
pub struct IntentCache<E> {
    order: Vec<E>,
    pending: HashMap<E, ElementIntent>,
}

impl<E> Default for IntentCache<E> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            pending: HashMap::new(),
        }
    }
}

impl<E: Copy + Eq + Hash> IntentCache<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending record for `element`, created on first use
    pub fn entry(&mut self, element: E) -> &mut ElementIntent {
        let order = &mut self.order;
        self.pending.entry(element).or_insert_with(|| {
            order.push(element);
            ElementIntent::new()
        })
    }

    pub fn get(&self, element: E) -> Option<&ElementIntent> {
        self.pending.get(&element)
    }

    /// Number of dirty elements
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Take every record in first-request order, leaving the cache empty
    pub fn drain(&mut self) -> Vec<(E, ElementIntent)> {
        let mut pending = std::mem::take(&mut self.pending);
        self.order
            .drain(..)
            .filter_map(|e| pending.remove(&e).map(|intent| (e, intent)))
            .collect()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::StyleValue;

    #[test]
    fn test_drain_in_first_request_order() {
        let mut cache = IntentCache::new();
        cache.entry(7u32).set("color", StyleValue::set("red"));
        cache.entry(3u32).set("color", StyleValue::set("blue"));
        cache.entry(7u32).set("width", StyleValue::set("1px"));

        assert_eq!(cache.len(), 2);
        let drained: Vec<u32> = cache.drain().into_iter().map(|(e, _)| e).collect();
        assert_eq!(drained, vec![7, 3]);
        assert!(cache.is_empty());
        assert!(cache.get(7).is_none());
    }
}
