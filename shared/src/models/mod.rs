//! Data models
//!
//! Shared between the wizard engine and the external collaborators
//! (category source, attribute source, submission sink).
//! All IDs are `i64`.

pub mod attribute;
pub mod category;
pub mod product;

// Re-exports
pub use attribute::*;
pub use category::*;
pub use product::*;
