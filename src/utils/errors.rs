use thiserror::Error;

/// Main error type for Attendify
#[derive(Error, Debug)]
pub enum AttendifyError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Permission error: {0}")]
    PermissionError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
