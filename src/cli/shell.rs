use std::io::{self, BufRead};

use chrono::Local;
use dialoguer::theme::ColorfulTheme;
use once_cell::sync::Lazy;
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;
use strsim::levenshtein;

use crate::config::ConfigManager;
use crate::core::{FormController, SubmitError};
use crate::storage::{columns, WorkbookConnector};

use super::forms;
use super::io as cli_io;
use super::output;
use super::state::CliState;
use super::CliError;

const SCRIPT_ENV: &str = "RESEP_CORE_CLI_SCRIPT";
const PROMPT: &str = "resep> ";
const SUGGESTION_DISTANCE: usize = 2;

struct CommandSpec {
    name: &'static str,
    aliases: &'static [&'static str],
    summary: &'static str,
}

static COMMANDS: Lazy<Vec<CommandSpec>> = Lazy::new(|| {
    vec![
        CommandSpec {
            name: "entry",
            aliases: &["input"],
            summary: "Isi form resep dan simpan",
        },
        CommandSpec {
            name: "show",
            aliases: &[],
            summary: "Tampilkan isi form saat ini",
        },
        CommandSpec {
            name: "reset",
            aliases: &[],
            summary: "Kosongkan seluruh form",
        },
        CommandSpec {
            name: "status",
            aliases: &[],
            summary: "Lokasi workbook dan jumlah data tersimpan",
        },
        CommandSpec {
            name: "help",
            aliases: &[],
            summary: "Daftar perintah",
        },
        CommandSpec {
            name: "exit",
            aliases: &["quit"],
            summary: "Keluar",
        },
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue,
    Exit,
}

pub fn run_cli() -> Result<(), CliError> {
    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    let workbook_path = config.workbook_path();

    let controller =
        FormController::with_policy(Local::now().date_naive(), config.read_error_policy);
    let connector = WorkbookConnector::new(workbook_path.clone());
    let mut state = CliState::new(controller, Box::new(connector), workbook_path);

    if std::env::var_os(SCRIPT_ENV).is_some() {
        run_script(&mut state)
    } else {
        run_interactive(&mut state)
    }
}

fn run_interactive(state: &mut CliState) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    let theme = ColorfulTheme::default();

    output::section("Input Data Resep");
    cli_io::print_info(format!("Workbook: {}", state.workbook_path().display()));
    cli_io::print_info("ID resep dibuat otomatis saat simpan. Ketik `help` untuk perintah.");

    loop {
        state.controller.apply_pending_resets();
        if let Some(message) = state.controller.take_success_message() {
            cli_io::print_success(message);
        }

        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();

                match dispatch(state, Some(&theme), trimmed)? {
                    LoopControl::Continue => {}
                    LoopControl::Exit => break,
                }
            }
            Err(ReadlineError::Interrupted) => {
                if cli_io::confirm_action(&theme, "Keluar dari aplikasi?", false)? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                cli_io::print_info("Keluar.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(state: &mut CliState) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        state.controller.apply_pending_resets();
        if let Some(message) = state.controller.take_success_message() {
            cli_io::print_success(message);
        }

        match dispatch(state, None, trimmed)? {
            LoopControl::Continue => {}
            LoopControl::Exit => return Ok(()),
        }
    }

    // Flush a success from a trailing `entry` line.
    state.controller.apply_pending_resets();
    if let Some(message) = state.controller.take_success_message() {
        cli_io::print_success(message);
    }
    Ok(())
}

fn dispatch(
    state: &mut CliState,
    theme: Option<&ColorfulTheme>,
    line: &str,
) -> Result<LoopControl, CliError> {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            cli_io::print_error(format!("Baris tidak valid: {err}"));
            return Ok(LoopControl::Continue);
        }
    };
    let Some(command) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    let rest = line
        .split_once(char::is_whitespace)
        .map(|(_, rest)| rest.trim())
        .unwrap_or("");

    match resolve(command) {
        Some("entry") => handle_entry(state, theme, rest),
        Some("show") => {
            render_draft(state);
            Ok(LoopControl::Continue)
        }
        Some("reset") => {
            state.controller.request_full_reset();
            cli_io::print_info("Form akan dikosongkan.");
            Ok(LoopControl::Continue)
        }
        Some("status") => {
            handle_status(state);
            Ok(LoopControl::Continue)
        }
        Some("help") => {
            render_help();
            Ok(LoopControl::Continue)
        }
        Some("exit") => Ok(LoopControl::Exit),
        _ => {
            unknown_command(command);
            Ok(LoopControl::Continue)
        }
    }
}

fn resolve(word: &str) -> Option<&'static str> {
    let lower = word.to_lowercase();
    COMMANDS
        .iter()
        .find(|spec| spec.name == lower || spec.aliases.contains(&lower.as_str()))
        .map(|spec| spec.name)
}

fn unknown_command(word: &str) {
    let nearest = COMMANDS
        .iter()
        .map(|spec| spec.name)
        .min_by_key(|name| levenshtein(name, word));
    match nearest.filter(|name| levenshtein(name, word) <= SUGGESTION_DISTANCE) {
        Some(name) => cli_io::print_error(format!(
            "Perintah `{word}` tidak dikenal. Maksud Anda `{name}`?"
        )),
        None => cli_io::print_error(format!("Perintah `{word}` tidak dikenal. Ketik `help`.")),
    }
}

fn handle_entry(
    state: &mut CliState,
    theme: Option<&ColorfulTheme>,
    rest: &str,
) -> Result<LoopControl, CliError> {
    if !rest.is_empty() {
        if let Err(message) = forms::apply_entry_spec(state.controller.draft_mut(), rest) {
            cli_io::print_error(message);
            return Ok(LoopControl::Continue);
        }
    } else {
        match theme {
            Some(theme) => forms::run_entry_form(theme, state.controller.draft_mut())?,
            None => {
                cli_io::print_error(
                    "Mode skrip membutuhkan: entry NAMA|RM|SEP|RESEP|ITERASI|DETUR",
                );
                return Ok(LoopControl::Continue);
            }
        }
    }

    match state.controller.submit(state.connector.as_ref()) {
        // The success message is rendered at the top of the next cycle,
        // after the partial reset has been applied.
        Ok(_id) => {}
        Err(SubmitError::ValidationFailed(failures)) => {
            for failure in failures {
                cli_io::print_error(failure);
            }
        }
        Err(err) => cli_io::print_error(err),
    }
    Ok(LoopControl::Continue)
}

fn handle_status(state: &CliState) {
    cli_io::print_info(format!("Workbook: {}", state.workbook_path().display()));
    match state.connector.connect() {
        Ok(store) => match store.read_column(columns::IDENTIFIER) {
            Ok(identifiers) => cli_io::print_info(format!("Jumlah data: {}", identifiers.len())),
            Err(err) => cli_io::print_error(format!("Gagal membaca workbook: {err}")),
        },
        Err(err) => cli_io::print_error(format!("Connection Error: {err}")),
    }
}

fn render_draft(state: &CliState) {
    let draft = state.controller.draft();
    output::section("Form Saat Ini");
    cli_io::print_info(format!("Tanggal Resep     : {}", draft.date));
    cli_io::print_info(format!("Nama Pasien       : {}", draft.patient_name));
    cli_io::print_info(format!("Nomor Rekam Medis : {}", draft.medical_record_number));
    cli_io::print_info(format!("Nomor SEP         : {}", draft.sep_number));
    cli_io::print_info(format!("Nomor Resep       : {}", draft.prescription_number));
    cli_io::print_info(format!("Iterasi           : {}", draft.iteration));
    cli_io::print_info(format!("Detur             : {}", draft.dispensing));
}

fn render_help() {
    output::section("Perintah");
    for spec in COMMANDS.iter() {
        let aliases = if spec.aliases.is_empty() {
            String::new()
        } else {
            format!(" ({})", spec.aliases.join(", "))
        };
        cli_io::print_info(format!("{:<8}{} - {}", spec.name, aliases, spec.summary));
    }
}

fn command_names() -> Vec<&'static str> {
    COMMANDS.iter().map(|spec| spec.name).collect()
}

struct CommandHelper {
    commands: Vec<&'static str>,
}

impl CommandHelper {
    fn new(commands: Vec<&'static str>) -> Self {
        Self { commands }
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        if prefix.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

impl Helper for CommandHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_canonical_names() {
        assert_eq!(resolve("entry"), Some("entry"));
        assert_eq!(resolve("input"), Some("entry"));
        assert_eq!(resolve("QUIT"), Some("exit"));
        assert_eq!(resolve("nope"), None);
    }
}
