//! Prescription entry domain models and field validation.

pub mod draft;
pub mod record;
pub mod validation;

pub use draft::{full_reset, partial_reset, FormDraft};
pub use record::{DispensingStatus, IterationStatus, PrescriptionRecord};
pub use validation::{validate, ValidationFailure};
