//! Wizard state machine
//!
//! Four steps, one-step forward/backward transitions, forward gated by
//! per-step validation. [`controller`] owns the draft aggregate and the
//! submission lifecycle.

pub mod controller;
pub mod step;
pub mod validation;

pub use controller::{BasicInfo, Specifications, WizardController, WizardFormData};
pub use step::WizardStep;
