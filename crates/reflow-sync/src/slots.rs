//! Slot Allocator & Rule-Position Table
//!
//! A slot is an element's durable rule identity; a position is where that
//! rule currently sits in the sheet. Positions shift when earlier rules are
//! deleted, slots never change and are never handed out twice.

use std::collections::HashMap;
use std::fmt;

/// Durable identity of one element's managed rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u64);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic slot counter
#[derive(Debug, Default)]
pub struct SlotAllocator {
    next: u64,
}

impl SlotAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next slot
    pub fn allocate(&mut self) -> SlotId {
        let slot = SlotId(self.next);
        self.next += 1;
        slot
    }

    /// The slot the next `allocate` will return
    pub fn peek(&self) -> SlotId {
        SlotId(self.next)
    }

    /// Number of slots ever issued
    pub fn issued(&self) -> u64 {
        self.next
    }
}

/// Live position → slot mapping, with a reverse index for O(1) lookup
///
/// Invariant: `positions.len()` equals the number of managed rules in the
/// sheet, and `index[positions[i]] == i` for every `i`.
#[derive(Debug, Default)]
pub struct RuleTable {
    positions: Vec<SlotId>,
    index: HashMap<SlotId, usize>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position of `slot`'s rule
    pub fn position_of(&self, slot: SlotId) -> Option<usize> {
        self.index.get(&slot).copied()
    }

    /// Slot rendered at `position`
    pub fn slot_at(&self, position: usize) -> Option<SlotId> {
        self.positions.get(position).copied()
    }

    /// Append a position for `slot` and return it
    pub fn bind(&mut self, slot: SlotId) -> usize {
        debug_assert!(!self.index.contains_key(&slot), "slot {slot} bound twice");
        let position = self.positions.len();
        self.positions.push(slot);
        self.index.insert(slot, position);
        position
    }

    /// Free `position`, shifting every later position down by one
    pub fn unbind(&mut self, position: usize) -> Option<SlotId> {
        if position >= self.positions.len() {
            return None;
        }
        let slot = self.positions.remove(position);
        self.index.remove(&slot);
        for (i, moved) in self.positions.iter().enumerate().skip(position) {
            self.index.insert(*moved, i);
        }
        Some(slot)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Slots in rule order
    pub fn slots(&self) -> &[SlotId] {
        &self.positions
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_is_monotonic() {
        let mut slots = SlotAllocator::new();
        assert_eq!(slots.allocate(), SlotId(0));
        assert_eq!(slots.allocate(), SlotId(1));
        assert_eq!(slots.peek(), SlotId(2));
        assert_eq!(slots.issued(), 2);
    }

    #[test]
    fn test_unbind_shifts_later_positions() {
        let mut table = RuleTable::new();
        for n in 0..4 {
            assert_eq!(table.bind(SlotId(n)), n as usize);
        }

        assert_eq!(table.unbind(1), Some(SlotId(1)));
        assert_eq!(table.slots(), &[SlotId(0), SlotId(2), SlotId(3)]);
        assert_eq!(table.position_of(SlotId(0)), Some(0));
        assert_eq!(table.position_of(SlotId(1)), None);
        assert_eq!(table.position_of(SlotId(3)), Some(2));
        assert_eq!(table.slot_at(1), Some(SlotId(2)));
    }

    #[test]
    fn test_unbind_out_of_range() {
        let mut table = RuleTable::new();
        table.bind(SlotId(5));
        assert_eq!(table.unbind(3), None);
        assert_eq!(table.len(), 1);
    }
}
