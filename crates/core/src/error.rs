//! Error types for spc-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for spc-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for spc-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// URL cannot be decomposed into bucket, region and key
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    /// Invalid user input other than a URL
    #[error("Invalid usage: {0}")]
    Usage(String),

    /// Configuration file or credential error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Authentication or permission failure reported by the service
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Bucket or object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other failure of a storage service call
    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::MalformedUrl(_) | Error::Usage(_) | Error::Config(_) => 2, // UsageError
            Error::Transport(_) => 3,                                          // NetworkError
            Error::Auth(_) => 4,                                               // AuthError
            Error::NotFound(_) => 5,                                           // NotFound
            _ => 1,                                                            // GeneralError
        }
    }
}
