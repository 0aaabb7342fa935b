//! Interactive presentation layer for the entry form.

pub mod forms;
pub mod io;
pub mod output;
mod shell;
pub mod state;

use thiserror::Error;

use crate::errors::StoreError;

pub use shell::run_cli;

/// Shell-level failures that abort the session. Submission failures are
/// rendered as messages instead and never raised through here.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Dialog(#[from] dialoguer::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}
