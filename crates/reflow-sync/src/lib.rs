//! Reflow Style Sync
//!
//! Incremental style synchronization for pages reflowed onto wide and
//! foldable screens.
//!
//! Layout heuristics ask for styles on individual elements whenever they
//! like; a scheduler calls [`StyleSync::flush`] once per cycle, and the
//! engine turns everything asked for since the last cycle into the smallest
//! set of rule inserts and deletes on the one sheet it owns.
//!
//! # Example
//! ```rust
//! use reflow_css::RuleSheet;
//! use reflow_dom::Document;
//! use reflow_sync::StyleSync;
//!
//! let mut doc = Document::default();
//! let body = doc.body();
//! let column = doc.append_element(body, "div").unwrap();
//!
//! let mut sync = StyleSync::new(doc, RuleSheet::new());
//! sync.request_style(column, "display", "flex");
//! sync.flush();
//!
//! assert_eq!(sync.sheet().len(), 1);
//! ```

mod config;
mod engine;
mod error;
mod flushed;
mod force_rules;
mod guard;
mod host;
mod intent;
mod ops;
mod removal;
mod selector;
mod slots;
mod value;

pub use config::SyncConfig;
pub use engine::{StyleSync, SyncStats};
pub use error::SyncError;
pub use flushed::{FlushedRecord, FlushedStore};
pub use force_rules::{ForceRule, ForceRuleRegistry};
pub use guard::{OverrideGuard, parse_forced_list};
pub use intent::IntentCache;
pub use ops::{ElementOps, RuleSheetOps};
pub use removal::RemovalQueue;
pub use selector::{SelectorSynthesizer, is_valid_ident};
pub use slots::{RuleTable, SlotAllocator, SlotId};
pub use value::{Declarations, ElementIntent, StyleValue};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
