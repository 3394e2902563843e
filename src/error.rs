//! Failure kinds reported by the command line, and their exit codes.

use std::io;
use std::path::PathBuf;

use icsfix_core::FixError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("output file must end in \".ics\".")]
    InvalidOutputExtension,

    #[error("\"{}\" does not exist.", .0.display())]
    InputNotFound(PathBuf, #[source] io::Error),

    #[error("\"{}\" is an invalid file/filetype.", .0.display())]
    OutputUnwritable(PathBuf, #[source] io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidOutputExtension => 3,
            CliError::InputNotFound(..) => 4,
            CliError::OutputUnwritable(..) => 5,
        }
    }
}

/// Exit code for an error returned from a command.
///
/// Usage errors never get here: clap prints them and exits with 2.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }

    match err.downcast_ref::<FixError>() {
        Some(
            FixError::MalformedRecord(_)
            | FixError::MissingMarker { .. }
            | FixError::InvalidField { .. },
        ) => 6,
        _ => 1,
    }
}
