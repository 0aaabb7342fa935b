use std::fmt;

use chrono::NaiveDate;

use super::draft::FormDraft;

/// Iteration allowance printed on the prescription.
///
/// The labels are the exact strings persisted alongside existing records;
/// changing them would break compatibility with stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IterationStatus {
    #[default]
    None,
    OnceAllowed,
    TwiceAllowed,
}

impl IterationStatus {
    pub const ALL: [IterationStatus; 3] = [Self::None, Self::OnceAllowed, Self::TwiceAllowed];

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Tanpa Iterasi",
            Self::OnceAllowed => "Diperbolehkan Iterasi 1 Kali",
            Self::TwiceAllowed => "Diperbolehkan Iterasi 2 Kali",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

impl fmt::Display for IterationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dispensing marker ("detur") for the prescription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispensingStatus {
    #[default]
    None,
    Original,
    Iter1x,
    Iter2x,
}

impl DispensingStatus {
    pub const ALL: [DispensingStatus; 4] =
        [Self::None, Self::Original, Self::Iter1x, Self::Iter2x];

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Ne Detur",
            Self::Original => "Detur Orig",
            Self::Iter1x => "Detur Iter 1x",
            Self::Iter2x => "Detur Iter 2x",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

impl fmt::Display for DispensingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A saved prescription row. Created only by a successful submission and
/// never mutated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionRecord {
    pub id: u64,
    pub date: NaiveDate,
    pub patient_name: String,
    pub medical_record_number: String,
    pub sep_number: String,
    pub prescription_number: String,
    pub iteration: IterationStatus,
    pub dispensing: DispensingStatus,
}

impl PrescriptionRecord {
    /// Builds the record saved for a draft, normalizing the patient name to
    /// uppercase. The identifier is assigned by the caller at save time.
    pub fn from_draft(draft: &FormDraft, id: u64) -> Self {
        Self {
            id,
            date: draft.date,
            patient_name: draft.patient_name.to_uppercase(),
            medical_record_number: draft.medical_record_number.clone(),
            sep_number: draft.sep_number.clone(),
            prescription_number: draft.prescription_number.clone(),
            iteration: draft.iteration,
            dispensing: draft.dispensing,
        }
    }

    /// Cells in the persisted column order (see `storage::columns`).
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.to_string(),
            self.patient_name.clone(),
            self.medical_record_number.clone(),
            self.sep_number.clone(),
            self.prescription_number.clone(),
            self.iteration.label().to_string(),
            self.dispensing.label().to_string(),
        ]
    }
}
