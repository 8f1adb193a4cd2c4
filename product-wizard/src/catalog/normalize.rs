//! Category payload normalization
//!
//! The category source may return a flat array, a keyed grouping of arrays,
//! or nothing at all. Everything is normalized into one canonical flat list
//! at this boundary; the resolver never sees the raw shape.

use std::collections::BTreeMap;

use serde::Deserialize;
use shared::models::Category;
use tracing::debug;

/// Raw payload shape at the ingestion edge
///
/// Untagged: the source decides the shape, we accept any of them. Anything
/// that matches none of the known shapes falls through to [`Self::Other`]
/// and normalizes to an empty list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryPayload {
    /// Flat (possibly nested via `children`) list of nodes
    List(Vec<RawCategory>),
    /// Keyed grouping of node lists; flattened in key order
    Grouped(BTreeMap<String, Vec<RawCategory>>),
    /// Null / unrecognized shape
    Other(serde_json::Value),
}

impl CategoryPayload {
    /// Empty payload, used when a load is outstanding or has failed
    pub fn empty() -> Self {
        Self::List(Vec::new())
    }

    /// Parse an arbitrary JSON value; never fails
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or(Self::Other(value))
    }
}

/// Lenient node shape used only during ingestion
///
/// `id` may be missing upstream; such a node is unusable (it cannot be
/// indexed or referenced) and is skipped together with its subtree.
/// A missing `name` is tolerated and substituted with an empty string.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub children: Vec<RawCategory>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Normalize a raw payload into the canonical flat category list.
/// Absent/null/malformed input yields an empty list, never an error.
pub fn normalize(payload: CategoryPayload) -> Vec<Category> {
    match payload {
        CategoryPayload::List(nodes) => convert_list(nodes),
        CategoryPayload::Grouped(groups) => groups
            .into_values()
            .flat_map(convert_list)
            .collect(),
        CategoryPayload::Other(value) => {
            debug!(shape = %value_shape(&value), "Unrecognized category payload, using empty list");
            Vec::new()
        }
    }
}

fn convert_list(nodes: Vec<RawCategory>) -> Vec<Category> {
    nodes.into_iter().filter_map(convert_node).collect()
}

fn convert_node(raw: RawCategory) -> Option<Category> {
    let Some(id) = raw.id else {
        debug!(name = %raw.name, "Skipping category node without id");
        return None;
    };
    Some(Category {
        id,
        name: raw.name,
        parent_id: raw.parent_id,
        children: convert_list(raw.children),
        description: raw.description,
    })
}

fn value_shape(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
