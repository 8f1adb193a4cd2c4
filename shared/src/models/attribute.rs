//! Attribute Model

use serde::{Deserialize, Serialize};

/// Catalog attribute as returned by the attribute source
///
/// Names only. The value lists a draft works with are user-defined per
/// product and live in [`DraftAttribute`], not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogAttribute {
    pub id: i64,
    pub name: String,
}

/// An attribute activated for the current product draft,
/// with its ordered, deduplicated value list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftAttribute {
    pub id: i64,
    pub name: String,
    /// Insertion order is significant: it defines row/column ordering
    /// downstream. Values are unique per attribute (exact match).
    #[serde(default)]
    pub values: Vec<String>,
}

impl DraftAttribute {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            values: Vec::new(),
        }
    }
}
