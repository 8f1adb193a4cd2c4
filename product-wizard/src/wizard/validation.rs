//! Step validation helpers
//!
//! Centralized text length constants and per-step validation functions.
//! Failures carry field-keyed details so the UI can surface them inline;
//! they block forward navigation but never touch the draft.

use rust_decimal::Decimal;
use shared::AppError;
use shared::models::VariantDraft;

// ── Text length limits ──────────────────────────────────────────────

/// Product name, after trimming
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 100;

/// Product description
pub const MAX_DESCRIPTION_LEN: usize = 1000;

// ── Per-step validators ─────────────────────────────────────────────

/// Basic Info: name trimmed non-empty and within bounds, description
/// within bounds.
pub fn validate_basic_info(name: &str, description: &str) -> Result<(), AppError> {
    let mut err = AppError::validation("Basic info is incomplete");
    let mut failed = false;

    let trimmed = name.trim();
    if trimmed.is_empty() {
        err = err.with_detail("name", "Product name must not be empty");
        failed = true;
    } else if trimmed.len() < MIN_NAME_LEN || trimmed.len() > MAX_NAME_LEN {
        err = err.with_detail(
            "name",
            format!(
                "Product name must be between {MIN_NAME_LEN} and {MAX_NAME_LEN} characters ({} given)",
                trimmed.len()
            ),
        );
        failed = true;
    }

    if description.len() > MAX_DESCRIPTION_LEN {
        err = err.with_detail(
            "description",
            format!(
                "Description is too long ({} chars, max {MAX_DESCRIPTION_LEN})",
                description.len()
            ),
        );
        failed = true;
    }

    if failed { Err(err) } else { Ok(()) }
}

/// Variants: every row needs a non-empty SKU and a parseable,
/// non-negative price.
pub fn validate_variant_rows(variants: &[VariantDraft]) -> Result<(), AppError> {
    let mut err = AppError::validation("Variant rows are incomplete");
    let mut failed = false;

    for (i, variant) in variants.iter().enumerate() {
        if variant.sku.trim().is_empty() {
            err = err.with_detail(format!("variants[{i}].sku"), "SKU must not be empty");
            failed = true;
        }
        if parse_price(&variant.price).is_none() {
            err = err.with_detail(
                format!("variants[{i}].price"),
                format!("Price '{}' is not a non-negative number", variant.price),
            );
            failed = true;
        }
    }

    if failed { Err(err) } else { Ok(()) }
}

/// Parse a user-entered price string. `None` if not a valid
/// non-negative decimal.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let price: Decimal = raw.trim().parse().ok()?;
    if price.is_sign_negative() {
        return None;
    }
    Some(price)
}
