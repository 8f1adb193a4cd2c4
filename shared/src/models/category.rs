//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity (one node of the classification tree)
///
/// The structure is logically a forest: `parent_id = None` means root.
/// `children` may be populated or empty depending on how much the source
/// has loaded; the resolver never assumes it is complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    /// Parent reference; `None` means this node is a root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    /// Child nodes (nested load; may be empty even if children exist upstream)
    #[serde(default)]
    pub children: Vec<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Category {
    /// Whether this node can be offered for selection.
    /// Nodes without a usable name are filtered out of option lists.
    pub fn is_selectable(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// One selectable entry at a category stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub id: i64,
    pub name: String,
    pub has_children: bool,
}
