use libcoursedeck::CoursedeckError;
use thiserror::Error;

/// Errors surfaced by the terminal UI.
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Core error: {0}")]
    Core(#[from] CoursedeckError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Application error: {0}")]
    Application(String),
}

pub type Result<T> = std::result::Result<T, TuiError>;
