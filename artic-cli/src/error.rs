//! Front-end error type.

use thiserror::Error;

/// Errors that end the program.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Client(#[from] artic_lib::error::Error),
    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}
