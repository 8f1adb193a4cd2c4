//! Product specification handling
//!
//! [`selection`] tracks active attributes and their value lists;
//! [`variants`] computes the SKU cross-product and reconciles user edits.

pub mod selection;
pub mod variants;

pub use selection::{AddValueOutcome, AttributeSelectionStore};
pub use variants::{can_generate, generate, variant_key, KEY_SEPARATOR};
