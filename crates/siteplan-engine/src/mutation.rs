use serde::{Deserialize, Serialize};
use siteplan_core::PageId;

/// Intent-level operations a shell can apply to the store. Each one
/// validates against the current document and either commits a fresh
/// document or returns a `GraphError`, leaving state untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Create a page under `parent`; the id is derived from the name.
    AddPage { parent: PageId, name: String },
    /// Remove a page together with everything underneath it.
    DeletePage { id: PageId },
    /// Link two existing pages. Multi-parent is allowed, cycles are not.
    Connect { source: PageId, target: PageId },
    /// Append a content section to a page.
    AddSection { page: PageId, name: String },
    /// Remove one content section; an absent id is a no-op.
    DeleteSection { page: PageId, section_id: String },
    /// Move a section within its page, array-move semantics.
    ReorderSections { page: PageId, from: usize, to: usize },
}
