use chrono::NaiveDate;

use super::record::{DispensingStatus, IterationStatus};

/// In-progress field values for one entry session.
///
/// Text fields hold the raw operator input; normalization happens when the
/// record is built. The date survives resets, matching the entry form where
/// the date picker defaults to the current day on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    pub date: NaiveDate,
    pub patient_name: String,
    pub medical_record_number: String,
    pub sep_number: String,
    pub prescription_number: String,
    pub iteration: IterationStatus,
    pub dispensing: DispensingStatus,
}

impl FormDraft {
    /// An empty draft dated for the given session day.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            patient_name: String::new(),
            medical_record_number: String::new(),
            sep_number: String::new(),
            prescription_number: String::new(),
            iteration: IterationStatus::default(),
            dispensing: DispensingStatus::default(),
        }
    }
}

/// Returns the draft with every field back at its default. Follows an
/// explicit operator reset.
pub fn full_reset(draft: &FormDraft) -> FormDraft {
    FormDraft::new(draft.date)
}

/// Returns the draft with only the prescription number cleared. Follows a
/// successful save, where the operator typically keeps the same patient for
/// the next prescription.
pub fn partial_reset(draft: &FormDraft) -> FormDraft {
    FormDraft {
        prescription_number: String::new(),
        ..draft.clone()
    }
}
