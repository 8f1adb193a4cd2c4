//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Classification of errors by domain, derived from the code range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// 0xxx: General errors
    General,
    /// 6xxx: Product / wizard errors
    Product,
    /// 9xxx: System errors
    System,
}

impl ErrorCategory {
    pub fn of(code: ErrorCode) -> Self {
        match code.as_u16() {
            6000..=6999 => Self::Product,
            9000..=9999 => Self::System,
            _ => Self::General,
        }
    }
}

impl ErrorCode {
    /// Category of this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::of(*self)
    }
}
