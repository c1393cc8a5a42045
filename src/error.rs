use thiserror::Error;

use crate::validation::ValidationFailure;

#[derive(Error, Debug)]
pub enum DoormanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Authentication service error: {0}")]
    Auth(String),

    #[error("{0} field(s) failed validation")]
    InvalidForm(usize),
}

pub type Result<T> = std::result::Result<T, DoormanError>;

/// Outcome of a failed form submission.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Field-addressable; shown inline next to each field.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// Anything else; shown as a generic alert.
    #[error(transparent)]
    Unexpected(#[from] DoormanError),
}
