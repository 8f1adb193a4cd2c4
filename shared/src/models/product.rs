//! Product draft and submission models

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::attribute::DraftAttribute;

/// One `{attribute_id, value}` pair of a variant combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOption {
    pub attribute_id: i64,
    pub value: String,
}

/// One candidate SKU row
///
/// `key` is the stable identity of the attribute-value combination and is
/// recomputed identically across regenerations; `sku` and `price` are the
/// user-editable fields that survive regeneration via that key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDraft {
    pub key: String,
    /// One entry per active attribute, in the fixed attribute order
    pub options: Vec<VariantOption>,
    #[serde(default)]
    pub sku: String,
    /// Numeric string; validated/parsed at the Variants step
    #[serde(default)]
    pub price: String,
}

/// One variant row of the submission payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionVariant {
    pub sku: String,
    pub price: Decimal,
    pub attribute_value_ids: Vec<i64>,
}

/// Payload handed to the submission sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSubmission {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Active attribute IDs, in activation order
    #[serde(default)]
    pub attributes: Vec<i64>,
    #[serde(default)]
    pub variants: Vec<SubmissionVariant>,
}

/// Structured failure from the submission sink
///
/// Every field is defaulted so a partially populated error body still
/// deserializes; the Preview step must be able to render this without
/// crashing on missing fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionError {
    /// Validation errors keyed by field name
    #[serde(default)]
    pub field_errors: HashMap<String, String>,
    /// Generic failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmissionError {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            field_errors: HashMap::new(),
            message: Some(message.into()),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.field_errors.insert(field.into(), message.into());
        self
    }
}

/// Existing product as supplied by the product-detail collaborator
/// (edit mode seed for the wizard draft)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetail {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Attributes with the value lists the product was saved with
    #[serde(default)]
    pub attributes: Vec<DraftAttribute>,
    #[serde(default)]
    pub variants: Vec<VariantDraft>,
}
