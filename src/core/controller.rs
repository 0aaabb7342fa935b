use chrono::NaiveDate;

use crate::domain::{self, FormDraft, PrescriptionRecord};
use crate::storage::{ReadErrorPolicy, StoreConnector};

use super::{queries, SubmitError, SubmitResult};

/// Session-scoped entry form state and workflow.
///
/// Reset requests are buffered in flags and applied at the start of the next
/// interaction cycle, before the form is rendered, so a cycle never observes
/// a half-applied reset.
#[derive(Debug)]
pub struct FormController {
    draft: FormDraft,
    success_message: Option<String>,
    full_reset_pending: bool,
    partial_reset_pending: bool,
    read_error_policy: ReadErrorPolicy,
}

impl FormController {
    pub fn new(session_date: NaiveDate) -> Self {
        Self::with_policy(session_date, ReadErrorPolicy::default())
    }

    pub fn with_policy(session_date: NaiveDate, read_error_policy: ReadErrorPolicy) -> Self {
        Self {
            draft: FormDraft::new(session_date),
            success_message: None,
            full_reset_pending: false,
            partial_reset_pending: false,
            read_error_policy,
        }
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FormDraft {
        &mut self.draft
    }

    /// Applies any buffered reset. A full reset supersedes a partial one
    /// queued for the same cycle.
    pub fn apply_pending_resets(&mut self) {
        if self.full_reset_pending {
            self.draft = domain::full_reset(&self.draft);
            self.full_reset_pending = false;
            self.partial_reset_pending = false;
        } else if self.partial_reset_pending {
            self.draft = domain::partial_reset(&self.draft);
            self.partial_reset_pending = false;
        }
    }

    /// Queues a reset of every field for the next cycle.
    pub fn request_full_reset(&mut self) {
        self.full_reset_pending = true;
    }

    /// Hands out the pending success message exactly once.
    pub fn take_success_message(&mut self) -> Option<String> {
        self.success_message.take()
    }

    /// Validates the draft, then checks for duplicates, assigns the next
    /// identifier, and appends the record.
    ///
    /// The duplicate check, the identifier read, and the append are
    /// independent store operations; nothing spans them transactionally. An
    /// identifier computed in a failed attempt is discarded and recomputed on
    /// retry.
    pub fn submit(&mut self, connector: &dyn StoreConnector) -> SubmitResult {
        let failures = domain::validate(&self.draft);
        if !failures.is_empty() {
            return Err(SubmitError::ValidationFailed(failures));
        }

        let store = connector.connect().map_err(SubmitError::Connection)?;

        let number = self.draft.prescription_number.clone();
        if queries::is_duplicate(store.as_ref(), &number, self.read_error_policy)
            .map_err(SubmitError::Read)?
        {
            return Err(SubmitError::DuplicatePrescription(number));
        }

        let id = queries::next_identifier(store.as_ref(), self.read_error_policy)
            .map_err(SubmitError::Read)?;

        let record = PrescriptionRecord::from_draft(&self.draft, id);
        store.append_row(&record.to_row()).map_err(SubmitError::Save)?;

        tracing::info!(id, prescription = %record.prescription_number, "prescription saved");
        self.success_message = Some(format!("Data Saved! ID: {}", id));
        self.partial_reset_pending = true;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn full_reset_supersedes_a_pending_partial_reset() {
        let mut controller = FormController::new(session_date());
        controller.draft_mut().patient_name = "PANCA WISANTA".into();
        controller.draft_mut().prescription_number = "12345678901234".into();

        controller.partial_reset_pending = true;
        controller.request_full_reset();
        controller.apply_pending_resets();

        assert!(controller.draft().patient_name.is_empty());
        assert!(controller.draft().prescription_number.is_empty());
        assert!(!controller.partial_reset_pending);
        assert!(!controller.full_reset_pending);
    }

    #[test]
    fn resets_are_idle_without_pending_flags() {
        let mut controller = FormController::new(session_date());
        controller.draft_mut().patient_name = "PANCA WISANTA".into();
        controller.apply_pending_resets();
        assert_eq!(controller.draft().patient_name, "PANCA WISANTA");
    }

    #[test]
    fn success_message_is_taken_once() {
        let mut controller = FormController::new(session_date());
        controller.success_message = Some("Data Saved! ID: 4".into());
        assert_eq!(
            controller.take_success_message().as_deref(),
            Some("Data Saved! ID: 4")
        );
        assert!(controller.take_success_message().is_none());
    }
}
