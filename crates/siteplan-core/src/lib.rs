use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub mod error;

pub use error::GraphError;

/// Id of the permanent root page. It exists in every document, is never
/// deleted, and never appears as an edge target.
pub const ROOT_PAGE_ID: &str = "home";

/// Node type tag stamped on pages created by this engine. Foreign documents
/// may carry other tags; they round-trip untouched.
pub const PAGE_NODE_KIND: &str = "pageNode";

/// Slug-form page identifier, e.g. `"service-detail-1"`.
///
/// Serializes as a bare JSON string so it can double as a `sectionsMap` key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_PAGE_ID
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PageId {}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Side of a page card an edge attaches to, spelled the way the rendering
/// layer expects them ("top", "bottom", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageData {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageNode {
    pub id: PageId,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub position: Position,
    pub data: PageData,
    #[serde(rename = "sourcePosition", skip_serializing_if = "Option::is_none")]
    pub source_position: Option<Anchor>,
    #[serde(rename = "targetPosition", skip_serializing_if = "Option::is_none")]
    pub target_position: Option<Anchor>,
}

impl PageNode {
    /// Builds an unplaced page node. Layout assigns the real position and
    /// anchor sides afterwards.
    pub fn new(id: PageId, label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id,
            kind: Some(PAGE_NODE_KIND.to_string()),
            position: Position::ZERO,
            data: PageData {
                label: label.into(),
                icon: Some(icon.into()),
            },
            source_position: None,
            target_position: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: PageId,
    pub target: PageId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
    /// Open style object (`{"strokeWidth": 2}` for engine-created edges).
    /// Kept opaque so foreign documents round-trip verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<serde_json::Value>,
}

impl Edge {
    /// Builds a parent link with the editor's default styling.
    pub fn link(id: impl Into<String>, source: PageId, target: PageId) -> Self {
        Self {
            id: id.into(),
            source,
            target,
            animated: Some(true),
            style: Some(serde_json::json!({ "strokeWidth": 2 })),
        }
    }
}

/// One reorderable content block of a page. Ids are unique within their
/// owning page only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
}

impl Section {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Ordered so exports come out deterministic.
pub type SectionsMap = BTreeMap<PageId, Vec<Section>>;

/// The complete persisted unit: everything the editor saves, loads, and
/// exchanges as JSON. State updates replace the whole document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HierarchyDocument {
    pub nodes: Vec<PageNode>,
    pub edges: Vec<Edge>,
    #[serde(rename = "sectionsMap")]
    pub sections_map: SectionsMap,
}

impl HierarchyDocument {
    pub fn page(&self, id: &PageId) -> Option<&PageNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn contains_page(&self, id: &PageId) -> bool {
        self.page(id).is_some()
    }
}
