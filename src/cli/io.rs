use std::fmt;

use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use super::output;
use super::CliError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Print an informational message via the standard CLI output helpers.
pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

/// Print an error message via the standard CLI output helpers.
pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

/// Print a success message via the standard CLI output helpers.
pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CliError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CliError::from)
}

/// Prompt for free-form text, seeding the editable buffer with the current
/// value. Empty input is allowed; validation happens at submission.
pub fn prompt_text_with_initial(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: &str,
) -> Result<String, CliError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(CliError::from)
}

/// Prompt for a calendar date, re-asking until the input parses.
pub fn prompt_date(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: NaiveDate,
) -> Result<NaiveDate, CliError> {
    let raw = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial.format(DATE_FORMAT).to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
                .map(|_| ())
                .map_err(|_| "Gunakan format YYYY-MM-DD".to_string())
        })
        .interact_text()?;
    Ok(NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).unwrap_or(initial))
}

/// Prompt with a fixed menu of labels, preselecting the current value.
pub fn prompt_select(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[&str],
    default: usize,
) -> Result<usize, CliError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(CliError::from)
}
