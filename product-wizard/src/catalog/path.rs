//! Category path resolution
//!
//! Turns the flat, parent-referencing category list into a root-to-leaf
//! selection path with per-stage option lists. Defensive against orphan
//! and cyclic references: malformed data degrades to a shorter path or a
//! skipped node, never an error.

use std::collections::{HashMap, HashSet};

use shared::models::{Category, CategoryOption};
use tracing::warn;

/// Indexed view of one category node
#[derive(Debug, Clone)]
struct NodeEntry {
    id: i64,
    name: String,
    parent_id: Option<i64>,
    /// Child ids in display order (nested children first, then any flat
    /// nodes that reference this node via `parent_id`)
    child_ids: Vec<i64>,
}

impl NodeEntry {
    fn is_selectable(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Result of a stage selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSelection {
    /// Ordered ancestor chain, root first
    pub path: Vec<i64>,
    /// The category id the draft should carry after this selection
    pub category_id: Option<i64>,
}

/// Resolves selection paths and per-stage options over a category forest
///
/// Accepts both nesting styles: nodes with populated `children` and flat
/// lists where parent linkage exists only through `parent_id`.
#[derive(Debug, Clone, Default)]
pub struct CategoryPathResolver {
    index: HashMap<i64, NodeEntry>,
    /// First-seen flatten order, used for stable option ordering
    order: Vec<i64>,
    /// Effective roots: no parent, or parent unresolvable (orphan)
    root_ids: Vec<i64>,
}

impl CategoryPathResolver {
    pub fn new(categories: Vec<Category>) -> Self {
        let mut resolver = Self::default();
        resolver.build_index(categories);
        resolver.link_flat_children();
        resolver.collect_roots();
        resolver
    }

    /// Flatten nested `children` into the id index with an explicit stack.
    /// A repeated id is an immediate stop for that branch, which bounds the
    /// walk on cyclic/malformed input.
    fn build_index(&mut self, categories: Vec<Category>) {
        let mut visited: HashSet<i64> = HashSet::new();
        let mut stack: Vec<Category> = Vec::new();
        // Reversed so that pop order matches the source order
        for category in categories.into_iter().rev() {
            stack.push(category);
        }

        while let Some(node) = stack.pop() {
            if !visited.insert(node.id) {
                warn!(id = node.id, "Repeated category id, stopping traversal of this branch");
                continue;
            }
            // Skip back-edges so a cyclic child never becomes a stage option
            let child_ids: Vec<i64> = node
                .children
                .iter()
                .map(|c| c.id)
                .filter(|cid| *cid != node.id && !visited.contains(cid))
                .collect();
            self.index.insert(
                node.id,
                NodeEntry {
                    id: node.id,
                    name: node.name,
                    parent_id: node.parent_id,
                    child_ids,
                },
            );
            self.order.push(node.id);
            for child in node.children.into_iter().rev() {
                stack.push(child);
            }
        }
    }

    /// Attach flat nodes to their parents via `parent_id`, for sources that
    /// deliver a flat list without nested `children`.
    fn link_flat_children(&mut self) {
        let order = self.order.clone();
        for id in order {
            let Some(parent_id) = self.index.get(&id).and_then(|e| e.parent_id) else {
                continue;
            };
            if parent_id == id {
                // Self-referencing node, leave it as an effective root
                continue;
            }
            if let Some(parent) = self.index.get_mut(&parent_id)
                && !parent.child_ids.contains(&id)
            {
                parent.child_ids.push(id);
            }
        }
    }

    /// Roots are the nodes no other node claims as a child. This covers
    /// `parent_id = None`, orphans (unresolvable parent), and nested
    /// children whose source omitted `parent_id`.
    fn collect_roots(&mut self) {
        let claimed: HashSet<i64> = self
            .index
            .values()
            .flat_map(|entry| entry.child_ids.iter().copied())
            .collect();
        self.root_ids = self
            .order
            .iter()
            .copied()
            .filter(|id| !claimed.contains(id))
            .collect();
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether `id` is reachable in the loaded category set
    pub fn contains(&self, id: i64) -> bool {
        self.index.contains_key(&id)
    }

    pub fn name_of(&self, id: i64) -> Option<&str> {
        self.index.get(&id).map(|e| e.name.as_str())
    }

    /// Ordered ancestor chain from root to `category_id`.
    ///
    /// Walks `parent_id` links upward until a root is reached, the parent
    /// cannot be resolved (orphan: the node reached so far acts as root),
    /// or a parent repeats (cycle: stop, do not loop).
    pub fn path_to(&self, category_id: i64) -> Vec<i64> {
        let mut chain: Vec<i64> = Vec::new();
        let mut seen: HashSet<i64> = HashSet::new();
        let mut current = category_id;

        loop {
            let Some(entry) = self.index.get(&current) else {
                break;
            };
            if !seen.insert(current) {
                warn!(id = current, "Cycle in category parent chain, truncating path");
                break;
            }
            chain.push(current);
            match entry.parent_id {
                Some(parent) if parent != current => current = parent,
                _ => break,
            }
        }

        chain.reverse();
        chain
    }

    /// Per-stage option lists for the given path.
    ///
    /// Stage 0 is always the root-level list. Stage n (n >= 1) exists only
    /// if the node selected at stage n-1 has a non-empty children list.
    /// Unusable nodes (empty name) are filtered out of option lists.
    pub fn stages(&self, path: &[i64]) -> Vec<Vec<CategoryOption>> {
        let mut stages = vec![self.options_for(&self.root_ids)];

        for id in path {
            let Some(entry) = self.index.get(id) else {
                break;
            };
            if entry.child_ids.is_empty() {
                break;
            }
            stages.push(self.options_for(&entry.child_ids));
        }

        stages
    }

    fn options_for(&self, ids: &[i64]) -> Vec<CategoryOption> {
        ids.iter()
            .filter_map(|id| self.index.get(id))
            .filter(|entry| entry.is_selectable())
            .map(|entry| CategoryOption {
                id: entry.id,
                name: entry.name.clone(),
                has_children: !entry.child_ids.is_empty(),
            })
            .collect()
    }

    /// Apply a selection at `stage`.
    ///
    /// `None` truncates the path to length `stage`: clearing the category
    /// at stage 0, otherwise falling back to the stage n-1 selection ("use
    /// the parent category"). `Some(id)` sets the first `stage + 1` entries
    /// and discards anything deeper.
    pub fn select(&self, path: &[i64], stage: usize, choice: Option<i64>) -> PathSelection {
        match choice {
            None => {
                let truncated: Vec<i64> = path.iter().copied().take(stage).collect();
                let category_id = truncated.last().copied();
                PathSelection {
                    path: truncated,
                    category_id,
                }
            }
            Some(id) => {
                if !self.contains(id) {
                    warn!(id, "Selected category id not in loaded set, ignoring");
                    return PathSelection {
                        path: path.to_vec(),
                        category_id: path.last().copied(),
                    };
                }
                let mut new_path: Vec<i64> = path.iter().copied().take(stage).collect();
                new_path.push(id);
                PathSelection {
                    path: new_path,
                    category_id: Some(id),
                }
            }
        }
    }
}
