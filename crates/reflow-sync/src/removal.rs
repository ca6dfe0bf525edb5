//! Deferred Removal Queue
//!
//! Node detachment requested between flushes, applied at the start of the
//! next flush.

/// Nodes waiting to be detached
#[derive(Debug)]
pub struct RemovalQueue<E> {
    nodes: Vec<E>,
}

impl<E> Default for RemovalQueue<E> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<E: Copy + PartialEq> RemovalQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `node` unless it is already queued
    pub fn push(&mut self, node: E) {
        if !self.nodes.contains(&node) {
            self.nodes.push(node);
        }
    }

    pub fn contains(&self, node: E) -> bool {
        self.nodes.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, E> {
        self.nodes.drain(..)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let mut queue = RemovalQueue::new();
        queue.push(1u32);
        queue.push(2u32);
        queue.push(1u32);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain().collect::<Vec<_>>(), vec![1, 2]);
        assert!(queue.is_empty());
    }
}
