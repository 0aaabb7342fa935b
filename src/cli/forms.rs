//! The prescription entry form: interactive prompts and the script-mode
//! field spec.

use dialoguer::theme::ColorfulTheme;

use crate::domain::{DispensingStatus, FormDraft, IterationStatus};

use super::io;
use super::CliError;

/// Collects every field interactively, seeding each prompt with the current
/// draft value so rejected submissions keep the operator's input.
pub fn run_entry_form(theme: &ColorfulTheme, draft: &mut FormDraft) -> Result<(), CliError> {
    draft.date = io::prompt_date(theme, "Tanggal Resep", draft.date)?;
    draft.patient_name =
        io::prompt_text_with_initial(theme, "Nama Pasien (ex: PANCA WISANTA)", &draft.patient_name)?;
    draft.medical_record_number = io::prompt_text_with_initial(
        theme,
        "Nomor Rekam Medis (6 Digit)",
        &draft.medical_record_number,
    )?;
    draft.sep_number =
        io::prompt_text_with_initial(theme, "Nomor SEP (19 Digit)", &draft.sep_number)?;
    draft.prescription_number = io::prompt_text_with_initial(
        theme,
        "Nomor Resep (14 Digit)",
        &draft.prescription_number,
    )?;

    let iteration_labels: Vec<&str> = IterationStatus::ALL.iter().map(|s| s.label()).collect();
    let current = IterationStatus::ALL
        .iter()
        .position(|s| *s == draft.iteration)
        .unwrap_or(0);
    let picked = io::prompt_select(theme, "Iterasi", &iteration_labels, current)?;
    draft.iteration = IterationStatus::ALL[picked];

    let dispensing_labels: Vec<&str> = DispensingStatus::ALL.iter().map(|s| s.label()).collect();
    let current = DispensingStatus::ALL
        .iter()
        .position(|s| *s == draft.dispensing)
        .unwrap_or(0);
    let picked = io::prompt_select(theme, "Detur", &dispensing_labels, current)?;
    draft.dispensing = DispensingStatus::ALL[picked];

    Ok(())
}

/// Applies the pipe-separated field list accepted by the script-mode `entry`
/// command: `NAME|MRN|SEP|RX|<iteration label>|<dispensing label>`.
pub fn apply_entry_spec(draft: &mut FormDraft, raw: &str) -> Result<(), String> {
    let fields: Vec<&str> = raw.split('|').map(str::trim).collect();
    if fields.len() != 6 {
        return Err(format!(
            "expected 6 fields separated by `|`, got {}",
            fields.len()
        ));
    }
    let iteration = IterationStatus::from_label(fields[4])
        .ok_or_else(|| format!("unknown iteration status `{}`", fields[4]))?;
    let dispensing = DispensingStatus::from_label(fields[5])
        .ok_or_else(|| format!("unknown dispensing status `{}`", fields[5]))?;

    draft.patient_name = fields[0].to_string();
    draft.medical_record_number = fields[1].to_string();
    draft.sep_number = fields[2].to_string();
    draft.prescription_number = fields[3].to_string();
    draft.iteration = iteration;
    draft.dispensing = dispensing;
    Ok(())
}
