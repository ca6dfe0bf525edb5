//! Flushed-State Store
//!
//! What each element's managed rule currently says. A record exists only
//! while the element has at least one applied property.

use std::collections::HashMap;
use std::hash::Hash;

use crate::slots::SlotId;
use crate::value::Declarations;

/// Last materialized state of one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushedRecord {
    pub slot: SlotId,
    pub applied: Declarations,
}

/// Previous generation the next flush diffs against
#[derive(Debug)]
pub struct FlushedStore<E> {
    records: HashMap<E, FlushedRecord>,
}

impl<E> Default for FlushedStore<E> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
        }
    }
}

impl<E: Copy + Eq + Hash> FlushedStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, element: E) -> Option<&FlushedRecord> {
        self.records.get(&element)
    }

    pub fn insert(&mut self, element: E, record: FlushedRecord) -> Option<FlushedRecord> {
        debug_assert!(!record.applied.is_empty(), "empty flushed record");
        self.records.insert(element, record)
    }

    pub fn remove(&mut self, element: E) -> Option<FlushedRecord> {
        self.records.remove(&element)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (E, &FlushedRecord)> {
        self.records.iter().map(|(e, r)| (*e, r))
    }

    /// Remove every record
    pub fn drain(&mut self) -> Vec<(E, FlushedRecord)> {
        self.records.drain().collect()
    }
}
