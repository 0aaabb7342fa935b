//! Field rules for the entry form.
//!
//! Every rule is checked independently; a draft with several bad fields
//! reports all of them at once, in field order.

use std::fmt;

use super::draft::FormDraft;

const MRN_LEN: usize = 6;
const SEP_LEN: usize = 19;
const PRESCRIPTION_LEN: usize = 14;

/// A single field-rule violation, rendered verbatim to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    EmptyName,
    InvalidMedicalRecordNumber,
    InvalidSepNumber,
    InvalidPrescriptionNumber,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::EmptyName => "Nama Pasien wajib diisi.",
            Self::InvalidMedicalRecordNumber => "Nomor RM harus tepat 6 angka.",
            Self::InvalidSepNumber => "Nomor SEP harus tepat 19 karakter.",
            Self::InvalidPrescriptionNumber => "Nomor Resep harus tepat 14 angka.",
        };
        f.write_str(message)
    }
}

/// Checks every field rule and reports all violations. An empty result means
/// the draft can be submitted.
///
/// Emptiness is checked after uppercase normalization only; whitespace-only
/// names count as filled.
pub fn validate(draft: &FormDraft) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();
    if draft.patient_name.to_uppercase().is_empty() {
        failures.push(ValidationFailure::EmptyName);
    }
    if !exact_digits(&draft.medical_record_number, MRN_LEN) {
        failures.push(ValidationFailure::InvalidMedicalRecordNumber);
    }
    if draft.sep_number.chars().count() != SEP_LEN {
        failures.push(ValidationFailure::InvalidSepNumber);
    }
    if !exact_digits(&draft.prescription_number, PRESCRIPTION_LEN) {
        failures.push(ValidationFailure::InvalidPrescriptionNumber);
    }
    failures
}

fn exact_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}
