use thiserror::Error;

/// Main error type for the MacroPulse system
#[derive(Error, Debug)]
pub enum MpError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised at the headline ingestion boundary
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Headline source not found: {0}")]
    SourceNotFound(String),

    #[error("Unknown risk category: {value}")]
    UnknownCategory { value: String },

    #[error("Unknown scenario: {value}")]
    UnknownScenario { value: String },

    #[error("Unknown region: {value}")]
    UnknownRegion { value: String },

    #[error("Feed parsing error: {message}")]
    ParseError { message: String },

    #[error("Feed loading failed: {message}")]
    LoadingFailed { message: String },
}

/// Result type alias for MacroPulse operations
pub type MpResult<T> = Result<T, MpError>;

/// Macro for creating validation errors
#[macro_export]
macro_rules! validation_error {
    ($($arg:tt)*) => {
        $crate::MpError::Validation(format!($($arg)*))
    };
}

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::MpError::Config(format!($($arg)*))
    };
}
