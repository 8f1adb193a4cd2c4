//! Unified error codes for the wizard engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 6xxx: Product / wizard errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 6xxx: Product / Wizard ====================
    /// Generation gate not satisfied (no active attribute, or an active
    /// attribute has no values)
    GenerationNotAllowed = 6001,
    /// Variants are stale: attributes/values changed since the last generate
    VariantsStale = 6002,
    /// Forward navigation blocked by the current step's validation
    StepBlocked = 6003,
    /// A submission is already in flight
    SubmissionInFlight = 6004,
    /// The submission sink rejected the payload
    SubmissionRejected = 6005,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
}

impl ErrorCode {
    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::InvalidRequest => "Invalid request",
            Self::GenerationNotAllowed => {
                "Variant generation requires at least one active attribute with values"
            }
            Self::VariantsStale => "Variants must be regenerated after attribute changes",
            Self::StepBlocked => "Current step is not valid",
            Self::SubmissionInFlight => "A submission is already in progress",
            Self::SubmissionRejected => "Submission was rejected",
            Self::InternalError => "Internal error",
        }
    }

    /// Numeric value of this code
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            5 => Ok(Self::InvalidRequest),
            6001 => Ok(Self::GenerationNotAllowed),
            6002 => Ok(Self::VariantsStale),
            6003 => Ok(Self::StepBlocked),
            6004 => Ok(Self::SubmissionInFlight),
            6005 => Ok(Self::SubmissionRejected),
            9001 => Ok(Self::InternalError),
            other => Err(InvalidErrorCode(other)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::GenerationNotAllowed,
            ErrorCode::SubmissionInFlight,
            ErrorCode::InternalError,
        ] {
            let value: u16 = code.into();
            assert_eq!(ErrorCode::try_from(value).unwrap(), code);
        }
    }

    #[test]
    fn test_unknown_value_rejected() {
        assert!(ErrorCode::try_from(4242).is_err());
    }

    #[test]
    fn test_display_format() {
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
        assert_eq!(ErrorCode::GenerationNotAllowed.to_string(), "E6001");
    }
}
