use thiserror::Error;

/// Main error type for the console
#[derive(Error, Debug)]
pub enum LoupError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Operator input errors
    #[error("Input out of range: {value} not in [{min}, {max}]")]
    InputOutOfRange {
        value: String,
        min: String,
        max: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Collaborator errors
    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Brokerage error: {0}")]
    Brokerage(String),

    // Terminal errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for LoupError
pub type Result<T> = std::result::Result<T, LoupError>;
