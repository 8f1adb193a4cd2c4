//! Attribute selection store
//!
//! Tracks which attributes are active for the current draft and, per
//! attribute, the ordered, deduplicated value list the user has defined.
//! Pure in-memory state: never triggers variant regeneration (that is an
//! explicit wizard action).

use std::collections::HashMap;

use shared::models::{CatalogAttribute, DraftAttribute};
use tracing::debug;

/// Outcome of an add-value action
///
/// The no-op cases are user-visible feedback, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddValueOutcome {
    /// Value appended to the end of the attribute's list
    Added,
    /// Raw input was empty after trimming
    Empty,
    /// Exact value already present for this attribute
    Duplicate,
    /// Attribute is not active
    Inactive,
}

/// In-memory store of the draft's active attributes and value lists
///
/// Activation order is preserved and defines the fixed attribute order
/// used by variant generation. Each distinct `(attribute, value)` pair is
/// interned with a draft-local numeric id so the submission payload can
/// reference values without a catalog round-trip; a removed value keeps
/// its id and gets the same one back if re-added.
#[derive(Debug, Clone, Default)]
pub struct AttributeSelectionStore {
    /// Active attributes in activation order
    active: Vec<DraftAttribute>,
    /// Draft-local value ids, keyed by (attribute_id, value)
    value_ids: HashMap<(i64, String), i64>,
    next_value_id: i64,
}

impl AttributeSelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active attributes, in activation order
    pub fn active(&self) -> &[DraftAttribute] {
        &self.active
    }

    pub fn active_ids(&self) -> Vec<i64> {
        self.active.iter().map(|a| a.id).collect()
    }

    pub fn is_active(&self, attribute_id: i64) -> bool {
        self.active.iter().any(|a| a.id == attribute_id)
    }

    /// Toggle an attribute on or off. Idempotent. Turning off removes the
    /// attribute's value list entirely, not just marks it inactive.
    pub fn toggle_attribute(&mut self, attribute: &CatalogAttribute, active: bool) {
        let position = self.active.iter().position(|a| a.id == attribute.id);
        match (active, position) {
            (true, None) => {
                self.active
                    .push(DraftAttribute::new(attribute.id, attribute.name.clone()));
            }
            (false, Some(idx)) => {
                let removed = self.active.remove(idx);
                debug!(
                    attribute_id = removed.id,
                    values = removed.values.len(),
                    "Attribute deactivated, values discarded"
                );
            }
            _ => {} // already in the requested state
        }
    }

    /// Append a value to an attribute's list.
    ///
    /// The raw input is trimmed; empty or duplicate (case-sensitive exact
    /// match) input is a reported no-op. Insertion order is preserved.
    pub fn add_value(&mut self, attribute_id: i64, raw_value: &str) -> AddValueOutcome {
        let value = raw_value.trim();
        if value.is_empty() {
            return AddValueOutcome::Empty;
        }
        let Some(attribute) = self.active.iter_mut().find(|a| a.id == attribute_id) else {
            return AddValueOutcome::Inactive;
        };
        if attribute.values.iter().any(|v| v == value) {
            return AddValueOutcome::Duplicate;
        }
        attribute.values.push(value.to_string());

        let key = (attribute_id, value.to_string());
        if !self.value_ids.contains_key(&key) {
            self.next_value_id += 1;
            self.value_ids.insert(key, self.next_value_id);
        }
        AddValueOutcome::Added
    }

    /// Remove the first exact match of `value`; no-op if absent.
    /// Returns whether anything was removed.
    pub fn remove_value(&mut self, attribute_id: i64, value: &str) -> bool {
        let Some(attribute) = self.active.iter_mut().find(|a| a.id == attribute_id) else {
            return false;
        };
        if let Some(idx) = attribute.values.iter().position(|v| v == value) {
            attribute.values.remove(idx);
            true
        } else {
            false
        }
    }

    /// Draft-local id interned for this (attribute, value) pair
    pub fn value_id(&self, attribute_id: i64, value: &str) -> Option<i64> {
        self.value_ids.get(&(attribute_id, value.to_string())).copied()
    }

    /// Seed the store from a previously saved product (edit mode)
    pub fn seed(&mut self, attributes: Vec<DraftAttribute>) {
        self.active.clear();
        for attribute in attributes {
            let id = attribute.id;
            self.active
                .push(DraftAttribute::new(id, attribute.name.clone()));
            for value in &attribute.values {
                self.add_value(id, value);
            }
        }
    }

    /// Discard everything (wizard reset)
    pub fn clear(&mut self) {
        self.active.clear();
        self.value_ids.clear();
        self.next_value_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> CatalogAttribute {
        CatalogAttribute {
            id: 1,
            name: "Color".to_string(),
        }
    }

    fn size() -> CatalogAttribute {
        CatalogAttribute {
            id: 2,
            name: "Size".to_string(),
        }
    }

    #[test]
    fn test_activation_order_preserved() {
        let mut store = AttributeSelectionStore::new();
        store.toggle_attribute(&size(), true);
        store.toggle_attribute(&color(), true);
        assert_eq!(store.active_ids(), vec![2, 1]);
    }

    #[test]
    fn test_toggle_is_idempotent() {
        let mut store = AttributeSelectionStore::new();
        store.toggle_attribute(&color(), true);
        store.toggle_attribute(&color(), true);
        assert_eq!(store.active().len(), 1);
        store.toggle_attribute(&color(), false);
        store.toggle_attribute(&color(), false);
        assert!(store.active().is_empty());
    }

    #[test]
    fn test_toggle_off_discards_values() {
        let mut store = AttributeSelectionStore::new();
        store.toggle_attribute(&color(), true);
        store.add_value(1, "Red");
        store.toggle_attribute(&color(), false);
        store.toggle_attribute(&color(), true);
        assert!(store.active()[0].values.is_empty());
    }

    #[test]
    fn test_add_value_trims_and_dedups() {
        let mut store = AttributeSelectionStore::new();
        store.toggle_attribute(&color(), true);
        assert_eq!(store.add_value(1, "  Red "), AddValueOutcome::Added);
        assert_eq!(store.add_value(1, "Red"), AddValueOutcome::Duplicate);
        assert_eq!(store.add_value(1, "   "), AddValueOutcome::Empty);
        // Case-sensitive dedup: "red" is a different value
        assert_eq!(store.add_value(1, "red"), AddValueOutcome::Added);
        assert_eq!(store.active()[0].values, vec!["Red", "red"]);
    }

    #[test]
    fn test_add_value_to_inactive_attribute() {
        let mut store = AttributeSelectionStore::new();
        assert_eq!(store.add_value(1, "Red"), AddValueOutcome::Inactive);
    }

    #[test]
    fn test_remove_value() {
        let mut store = AttributeSelectionStore::new();
        store.toggle_attribute(&color(), true);
        store.add_value(1, "Red");
        store.add_value(1, "Blue");
        assert!(store.remove_value(1, "Red"));
        assert!(!store.remove_value(1, "Red"));
        assert_eq!(store.active()[0].values, vec!["Blue"]);
    }

    #[test]
    fn test_value_id_stable_across_remove_and_readd() {
        let mut store = AttributeSelectionStore::new();
        store.toggle_attribute(&color(), true);
        store.add_value(1, "Red");
        let id = store.value_id(1, "Red").unwrap();
        store.remove_value(1, "Red");
        store.add_value(1, "Red");
        assert_eq!(store.value_id(1, "Red"), Some(id));
    }

    #[test]
    fn test_value_ids_distinct_per_attribute() {
        let mut store = AttributeSelectionStore::new();
        store.toggle_attribute(&color(), true);
        store.toggle_attribute(&size(), true);
        store.add_value(1, "M");
        store.add_value(2, "M");
        assert_ne!(store.value_id(1, "M"), store.value_id(2, "M"));
    }
}
