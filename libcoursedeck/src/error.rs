//! Error types for Coursedeck

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoursedeckError>;

/// Fallback message stored when a failure carries no structured payload.
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

#[derive(Error, Debug)]
pub enum CoursedeckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoursedeckError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CoursedeckError::InvalidInput(_) => 3,
            CoursedeckError::Config(_) => 2,
            CoursedeckError::Session(_) => 2,
            CoursedeckError::Api(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not locate the {0} directory")]
    MissingDirectory(&'static str),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to access session cache: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed session cache: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failure of one gateway operation, in the shape slice state stores it.
///
/// The three cases are deliberately distinct: a local precondition failure
/// never reaches the network, a backend failure keeps the server's payload
/// verbatim, and a transport failure carries only the generic fallback
/// message (the underlying cause goes to the log, not to state).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Teacher id is missing from the session cache")]
    MissingTeacherId,

    #[error("Backend error: {0}")]
    Backend(serde_json::Value),

    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    /// Transport failure carrying the generic fallback message.
    pub fn fallback() -> Self {
        ApiError::Transport(FALLBACK_MESSAGE.to_string())
    }
}
