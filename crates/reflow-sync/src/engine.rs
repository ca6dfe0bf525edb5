//! Style Sync Engine
//!
//! Buffers style requests between flushes and reconciles them against the
//! rule sheet in one pass, writing only rules whose content changed.
//!
//! Each managed element owns at most one rule. The rule's position in the
//! sheet is looked up through its slot on every write, so deleting one
//! element's rule never disturbs how the others are addressed.

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::flushed::{FlushedRecord, FlushedStore};
use crate::guard::OverrideGuard;
use crate::intent::IntentCache;
use crate::ops::{ElementOps, RuleSheetOps};
use crate::removal::RemovalQueue;
use crate::selector::SelectorSynthesizer;
use crate::slots::{RuleTable, SlotAllocator, SlotId};
use crate::value::{Declarations, ElementIntent, StyleValue};

/// Engine statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub flushes: u64,
    pub rules_inserted: u64,
    pub rules_deleted: u64,
    /// Dirty elements whose rule already said what was requested
    pub skipped_unchanged: u64,
    /// Requests dropped because the host owns the property
    pub forced_rejections: u64,
    pub nodes_removed: u64,
    pub sheet_errors: u64,
}

impl SyncStats {
    /// Share of reconciled elements that needed no sheet write
    pub fn skip_rate(&self) -> f64 {
        let total = self.skipped_unchanged + self.rules_inserted;
        if total == 0 {
            0.0
        } else {
            self.skipped_unchanged as f64 / total as f64
        }
    }
}

/// Incremental style synchronizer over one engine-owned rule sheet
pub struct StyleSync<D: ElementOps, S: RuleSheetOps> {
    dom: D,
    sheet: S,
    intents: IntentCache<D::Element>,
    removals: RemovalQueue<D::Element>,
    flushed: FlushedStore<D::Element>,
    slots: SlotAllocator,
    table: RuleTable,
    guard: OverrideGuard,
    synth: SelectorSynthesizer,
    stats: SyncStats,
}

impl<D: ElementOps, S: RuleSheetOps> StyleSync<D, S> {
    /// Create an engine with the default configuration
    pub fn new(dom: D, sheet: S) -> Self {
        Self::build(dom, sheet, &SyncConfig::default())
    }

    /// Create an engine with a validated configuration
    pub fn with_config(dom: D, sheet: S, config: &SyncConfig) -> Result<Self, SyncError> {
        config.validate()?;
        Ok(Self::build(dom, sheet, config))
    }

    fn build(dom: D, sheet: S, config: &SyncConfig) -> Self {
        Self {
            dom,
            sheet,
            intents: IntentCache::new(),
            removals: RemovalQueue::new(),
            flushed: FlushedStore::new(),
            slots: SlotAllocator::new(),
            table: RuleTable::new(),
            guard: OverrideGuard::new(config.force_attribute.clone()),
            synth: SelectorSynthesizer::new(config),
            stats: SyncStats::default(),
        }
    }

    // ------------------------------------------------------------------
    // Requests
    // ------------------------------------------------------------------

    /// Ask for `property` to be `value` on `element` at the next flush
    pub fn request_style(
        &mut self,
        element: impl Into<Option<D::Element>>,
        property: &str,
        value: impl Into<StyleValue>,
    ) {
        let Some(element) = element.into() else {
            return;
        };
        if self.guard.is_forced(&self.dom, element, property) {
            tracing::trace!("{:?}: {} is forced by the host, ignoring", element, property);
            self.stats.forced_rejections += 1;
            return;
        }
        self.intents.entry(element).set(property, value.into());
    }

    /// Ask for `property` to stop being managed on `element`
    pub fn request_delete(&mut self, element: impl Into<Option<D::Element>>, property: &str) {
        self.request_style(element, property, StyleValue::Delete);
    }

    /// Ask for the element's whole rule to be dropped
    pub fn request_delete_all(&mut self, element: impl Into<Option<D::Element>>) {
        if let Some(element) = element.into() {
            self.intents.entry(element).mark_delete_all();
        }
    }

    /// Ask for `node` to be detached at the next flush
    pub fn request_removal(&mut self, node: impl Into<Option<D::Element>>) {
        if let Some(node) = node.into() {
            self.removals.push(node);
        }
    }

    // ------------------------------------------------------------------
    // Flush
    // ------------------------------------------------------------------

    /// Reconcile every buffered request against the sheet
    pub fn flush(&mut self) {
        self.stats.flushes += 1;
        if self.intents.is_empty() && self.removals.is_empty() {
            return;
        }
        self.ensure_attached();

        let before = self.stats;
        for node in self.removals.drain() {
            self.dom.remove(node);
            self.stats.nodes_removed += 1;
        }

        let pending = self.intents.drain();
        let dirty = pending.len();
        for (element, intent) in pending {
            self.reconcile(element, &intent);
        }

        tracing::debug!(
            "Flushed {} elements: {} inserted, {} deleted, {} unchanged, {} live rules",
            dirty,
            self.stats.rules_inserted - before.rules_inserted,
            self.stats.rules_deleted - before.rules_deleted,
            self.stats.skipped_unchanged - before.skipped_unchanged,
            self.table.len(),
        );
    }

    fn ensure_attached(&mut self) {
        if !self.sheet.is_attached() {
            tracing::warn!("Managed style sheet detached, reattaching");
            self.sheet.attach();
        }
    }

    fn reconcile(&mut self, element: D::Element, intent: &ElementIntent) {
        let connected = self.dom.is_connected(element);

        if intent.delete_all() {
            self.drop_record(element, connected);
            if !intent.has_concrete_values() {
                return;
            }
        }

        let empty = Declarations::new();
        let (slot, applied) = match self.flushed.get(element) {
            Some(record) => (Some(record.slot), &record.applied),
            None => (None, &empty),
        };

        if applied.satisfies(intent) {
            tracing::trace!("{:?}: rule already up to date", element);
            self.stats.skipped_unchanged += 1;
            return;
        }

        let mut applied = applied.clone();
        applied.merge(intent);

        if applied.is_empty() {
            self.drop_record(element, connected);
            return;
        }

        let managed = slot.is_some();
        let slot = slot.unwrap_or_else(|| self.slots.allocate());
        let selector = self.synth.selector(&self.dom, element, slot);
        if connected {
            self.synth.apply_fingerprint(&mut self.dom, element, slot);
        }

        let text = self.synth.rule_text(&selector, &applied);
        if self.write_rule(slot, &text) {
            self.flushed.insert(element, FlushedRecord { slot, applied });
        } else if !managed && connected {
            self.synth.strip_fingerprint(&mut self.dom, element);
        }
    }

    /// Insert or refresh `slot`'s rule in place
    ///
    /// A refresh goes in ahead of the stale rule, which is deleted only once
    /// the sheet accepts the new text. A rejected refresh leaves the previous
    /// rule where it was; a rejected first insert gives the position back.
    fn write_rule(&mut self, slot: SlotId, text: &str) -> bool {
        let (position, stale) = match self.table.position_of(slot) {
            Some(position) => (position, true),
            None => (self.table.bind(slot), false),
        };

        match self.sheet.insert_rule(text, position) {
            Ok(_) => {
                tracing::trace!("Slot {} -> rule #{}: {}", slot, position, text);
                self.stats.rules_inserted += 1;
                if stale {
                    self.delete_at(position + 1);
                }
                true
            }
            Err(e) => {
                tracing::warn!("Rule for slot {} rejected: {}", slot, e);
                self.stats.sheet_errors += 1;
                if !stale {
                    self.table.unbind(position);
                }
                false
            }
        }
    }

    fn delete_at(&mut self, position: usize) {
        match self.sheet.delete_rule(position) {
            Ok(()) => self.stats.rules_deleted += 1,
            Err(e) => {
                tracing::warn!("Failed to delete rule #{}: {}", position, e);
                self.stats.sheet_errors += 1;
            }
        }
    }

    /// Remove the element's rule and record; the slot number stays burned
    fn drop_record(&mut self, element: D::Element, connected: bool) {
        let Some(record) = self.flushed.remove(element) else {
            return;
        };
        if let Some(position) = self.table.position_of(record.slot) {
            self.delete_at(position);
            self.table.unbind(position);
        }
        if connected {
            self.synth.strip_fingerprint(&mut self.dom, element);
        }
        tracing::trace!("{:?}: dropped rule for slot {}", element, record.slot);
    }

    /// Forget every managed rule and pending request
    ///
    /// The slot counter keeps counting so fingerprints from before the reset
    /// can never address a new element.
    pub fn clear_all(&mut self) {
        if !self.table.is_empty() {
            self.ensure_attached();
        }
        for position in (0..self.table.len()).rev() {
            self.delete_at(position);
        }
        self.table.clear();

        for (element, _) in self.flushed.drain() {
            if self.dom.is_connected(element) {
                self.synth.strip_fingerprint(&mut self.dom, element);
            }
        }
        self.intents.clear();
        self.removals.clear();
        tracing::debug!("Cleared style sync state ({} slots issued)", self.slots.issued());
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Declarations currently applied to `element`
    pub fn applied(&self, element: D::Element) -> Option<&Declarations> {
        self.flushed.get(element).map(|r| &r.applied)
    }

    pub fn slot_of(&self, element: D::Element) -> Option<SlotId> {
        self.flushed.get(element).map(|r| r.slot)
    }

    /// Elements with a live managed rule
    pub fn managed_len(&self) -> usize {
        self.flushed.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.intents.is_empty() || !self.removals.is_empty()
    }

    /// Number of elements with buffered style requests
    pub fn pending_len(&self) -> usize {
        self.intents.len()
    }

    pub fn rule_table(&self) -> &RuleTable {
        &self.table
    }

    pub fn synthesizer(&self) -> &SelectorSynthesizer {
        &self.synth
    }

    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Host-side access, for simulating the page mutating itself
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn sheet(&self) -> &S {
        &self.sheet
    }

    /// Host-side access, for simulating the page detaching the sheet
    pub fn sheet_mut(&mut self) -> &mut S {
        &mut self.sheet
    }

    pub fn into_parts(self) -> (D, S) {
        (self.dom, self.sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_css::RuleSheet;
    use reflow_dom::{Document, NodeId};

    fn engine_with(count: usize) -> (StyleSync<Document, RuleSheet>, Vec<NodeId>) {
        let mut doc = Document::default();
        let body = doc.body();
        let nodes = (0..count)
            .map(|_| doc.append_element(body, "div").unwrap())
            .collect();
        (StyleSync::new(doc, RuleSheet::new()), nodes)
    }

    #[test]
    fn test_requests_only_buffer() {
        let (mut sync, nodes) = engine_with(1);
        sync.request_style(nodes[0], "color", "red");
        sync.request_removal(nodes[0]);

        assert!(sync.has_pending());
        assert_eq!(sync.pending_len(), 1);
        assert!(sync.sheet().is_empty());
        assert!(!sync.sheet().is_attached());
    }

    #[test]
    fn test_none_element_is_ignored() {
        let (mut sync, _) = engine_with(0);
        sync.request_style(None, "color", "red");
        sync.request_delete(None, "color");
        sync.request_delete_all(None);
        sync.request_removal(None);

        assert!(!sync.has_pending());
    }

    #[test]
    fn test_refresh_keeps_position() {
        let (mut sync, nodes) = engine_with(3);
        for (i, &node) in nodes.iter().enumerate() {
            sync.request_style(node, "order", i.to_string());
        }
        sync.flush();

        sync.request_style(nodes[0], "order", "9");
        sync.flush();

        assert_eq!(sync.rule_table().slots(), &[SlotId(0), SlotId(1), SlotId(2)]);
        assert_eq!(sync.sheet().rules()[0].declaration("order").unwrap().value, "9");
        assert_eq!(sync.stats().rules_deleted, 1);
    }

    #[test]
    fn test_delete_only_on_unmanaged_element_is_free() {
        let (mut sync, nodes) = engine_with(1);
        sync.request_delete(nodes[0], "color");
        sync.flush();

        assert!(sync.sheet().is_empty());
        assert_eq!(sync.slot_of(nodes[0]), None);
        assert_eq!(sync.stats().skipped_unchanged, 1);
    }

    #[test]
    fn test_skip_rate() {
        let stats = SyncStats {
            rules_inserted: 3,
            skipped_unchanged: 1,
            ..SyncStats::default()
        };
        assert_eq!(stats.skip_rate(), 0.25);
        assert_eq!(SyncStats::default().skip_rate(), 0.0);
    }
}
