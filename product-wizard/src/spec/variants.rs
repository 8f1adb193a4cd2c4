//! Variant generation
//!
//! Computes the Cartesian product of the active attributes' value lists and
//! reconciles against the previous draft list so manual SKU/price edits
//! survive regeneration. Pure and synchronous.

use std::collections::HashMap;

use shared::models::{DraftAttribute, VariantDraft, VariantOption};
use tracing::debug;

/// Separator between `attribute_id:value` pairs in a variant key
pub const KEY_SEPARATOR: &str = "|";

/// Price assigned to freshly created drafts
const DEFAULT_PRICE: &str = "0";

/// Whether generation is permitted: at least one active attribute, and
/// every active attribute has at least one value.
pub fn can_generate(active: &[DraftAttribute]) -> bool {
    !active.is_empty() && active.iter().all(|a| !a.values.is_empty())
}

/// Stable identity key for one combination: `attribute_id:value` pairs in
/// the fixed attribute order, joined by [`KEY_SEPARATOR`]. Recomputed
/// identically across regenerations.
pub fn variant_key(options: &[VariantOption]) -> String {
    options
        .iter()
        .map(|o| format!("{}:{}", o.attribute_id, o.value))
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

/// Generate the full variant list for the active attributes, carrying over
/// `sku` and `price` from `previous` drafts whose key still exists.
///
/// Iteration order is lexicographic with the last-activated attribute
/// varying fastest; the result follows that order, not the prior list's.
/// Returns an empty list when the generation gate is not satisfied.
pub fn generate(active: &[DraftAttribute], previous: &[VariantDraft]) -> Vec<VariantDraft> {
    if !can_generate(active) {
        return Vec::new();
    }

    let total: usize = active.iter().map(|a| a.values.len()).product();
    let prior: HashMap<&str, &VariantDraft> =
        previous.iter().map(|v| (v.key.as_str(), v)).collect();

    let mut drafts = Vec::with_capacity(total);
    let mut cursor = vec![0usize; active.len()];

    for _ in 0..total {
        let options: Vec<VariantOption> = active
            .iter()
            .zip(&cursor)
            .map(|(attribute, &idx)| VariantOption {
                attribute_id: attribute.id,
                value: attribute.values[idx].clone(),
            })
            .collect();
        let key = variant_key(&options);

        let draft = match prior.get(key.as_str()) {
            Some(prev) => VariantDraft {
                key,
                options,
                sku: prev.sku.clone(),
                price: prev.price.clone(),
            },
            None => VariantDraft {
                key,
                options,
                sku: String::new(),
                price: DEFAULT_PRICE.to_string(),
            },
        };
        drafts.push(draft);

        // Odometer advance: rightmost (last-activated) attribute fastest
        for pos in (0..cursor.len()).rev() {
            cursor[pos] += 1;
            if cursor[pos] < active[pos].values.len() {
                break;
            }
            cursor[pos] = 0;
        }
    }

    let carried = drafts.iter().filter(|d| prior.contains_key(d.key.as_str())).count();
    debug!(total = drafts.len(), carried, "Variants generated");
    drafts
}
