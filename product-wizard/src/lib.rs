//! Product Specification & Variant Generation Engine
//!
//! The core of the back-office product wizard:
//!
//! - [`catalog`] — category payload normalization and path resolution
//! - [`spec`] — attribute selection and variant generation
//! - [`wizard`] — the 4-step wizard state machine and submission assembly
//! - [`sources`] — contracts for the external collaborators (category and
//!   attribute sources, submission sink)
//!
//! All mutations happen synchronously on a single logical thread; async
//! boundaries exist only at the [`sources`] edges.

pub mod catalog;
pub mod sources;
pub mod spec;
pub mod wizard;

// Re-exports
pub use catalog::{CategoryPathResolver, CategoryPayload, PathSelection};
pub use spec::{AddValueOutcome, AttributeSelectionStore};
pub use wizard::{WizardController, WizardFormData, WizardStep};
