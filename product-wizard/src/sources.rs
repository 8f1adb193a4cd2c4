//! External collaborator contracts
//!
//! The engine consumes reference data and delivers the final payload
//! through these traits. Transport, storage, and retry semantics are the
//! implementors' concern; the engine only sees the request/response shape.

use async_trait::async_trait;
use shared::AppResult;
use shared::models::{CatalogAttribute, ProductSubmission, SubmissionError};

use crate::catalog::CategoryPayload;

/// Supplies the category forest at wizard start
#[async_trait]
pub trait CategorySource: Send + Sync {
    /// Raw category payload; shape is normalized by the engine.
    /// While a load is outstanding the engine works with an empty list,
    /// which is a legitimate transient state, not an error.
    async fn fetch_categories(&self) -> AppResult<CategoryPayload>;
}

/// Supplies the attribute name catalog
#[async_trait]
pub trait AttributeSource: Send + Sync {
    async fn fetch_attributes(&self) -> AppResult<Vec<CatalogAttribute>>;
}

/// Accepts the assembled product payload
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Create or update the product. A rejection carries per-field
    /// messages and/or a generic message; the draft is never discarded
    /// on failure.
    async fn submit_product(&self, payload: &ProductSubmission) -> Result<(), SubmissionError>;
}
