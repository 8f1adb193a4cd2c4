//! Shared types for the back-office product wizard
//!
//! Common types used across the wizard engine and its collaborators:
//! catalog models, draft/submission structures, and the unified error
//! system.

pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
