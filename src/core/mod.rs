//! Entry-form workflow: the session controller and its store queries.

pub mod controller;
pub mod queries;

pub use controller::FormController;
pub use queries::{is_duplicate, next_identifier};

use thiserror::Error;

use crate::domain::ValidationFailure;
use crate::errors::StoreError;

pub type SubmitResult = Result<u64, SubmitError>;

/// Failure taxonomy for one submission attempt. Every variant is recoverable
/// within the session; the draft keeps its values so the operator can correct
/// and retry.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// One or more field rules failed; the store was never touched.
    #[error("data tidak valid")]
    ValidationFailed(Vec<ValidationFailure>),
    #[error("Connection Error: {0}")]
    Connection(#[source] StoreError),
    #[error("DATA GANDA: Nomor Resep {0} sudah ada!")]
    DuplicatePrescription(String),
    #[error("Save Failed: {0}")]
    Save(#[source] StoreError),
    /// A read during the duplicate check or identifier computation failed
    /// under `ReadErrorPolicy::Propagate`.
    #[error("Gagal membaca data resep: {0}")]
    Read(#[source] StoreError),
}
