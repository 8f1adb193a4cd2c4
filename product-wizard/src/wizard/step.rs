//! Wizard steps

use serde::{Deserialize, Serialize};

/// The four wizard steps, in order
///
/// Transitions move forward or backward by exactly one step; arbitrary
/// jumps are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardStep {
    #[default]
    BasicInfo,
    Specification,
    Variants,
    Preview,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::BasicInfo,
        WizardStep::Specification,
        WizardStep::Variants,
        WizardStep::Preview,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::BasicInfo => 0,
            Self::Specification => 1,
            Self::Variants => 2,
            Self::Preview => 3,
        }
    }

    pub fn next(self) -> Option<WizardStep> {
        match self {
            Self::BasicInfo => Some(Self::Specification),
            Self::Specification => Some(Self::Variants),
            Self::Variants => Some(Self::Preview),
            Self::Preview => None,
        }
    }

    pub fn prev(self) -> Option<WizardStep> {
        match self {
            Self::BasicInfo => None,
            Self::Specification => Some(Self::BasicInfo),
            Self::Variants => Some(Self::Specification),
            Self::Preview => Some(Self::Variants),
        }
    }

    /// Display progress percentage: `100 * index / (steps - 1)`.
    /// Presentation only, never used for validity.
    pub fn progress_percent(self) -> u8 {
        (100 * self.index() / (Self::ALL.len() - 1)) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order_round_trips() {
        for (i, step) in WizardStep::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
            if let Some(next) = step.next() {
                assert_eq!(next.prev(), Some(*step));
            }
        }
        assert_eq!(WizardStep::Preview.next(), None);
        assert_eq!(WizardStep::BasicInfo.prev(), None);
    }

    #[test]
    fn test_progress_percentages() {
        assert_eq!(WizardStep::BasicInfo.progress_percent(), 0);
        assert_eq!(WizardStep::Specification.progress_percent(), 33);
        assert_eq!(WizardStep::Variants.progress_percent(), 66);
        assert_eq!(WizardStep::Preview.progress_percent(), 100);
    }
}
