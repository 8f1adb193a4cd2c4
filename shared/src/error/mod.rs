//! Unified error system for the wizard engine
//!
//! - [`ErrorCode`]: standardized error codes
//! - [`ErrorCategory`]: classification of errors by domain
//! - [`AppError`]: rich error type with codes, messages, and field details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 6xxx: Product / wizard errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! // Create an error with a custom message
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "Product name is required");
//!
//! // Attach a field-level detail
//! let err = AppError::validation("Product name is required").with_detail("name", "required");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
