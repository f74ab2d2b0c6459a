//!
//! Error handling for the Kii command-line client.
//!
//! Defines the error type shared by configuration loading, authentication,
//! request dispatch and log rendering, together with the process exit code
//! each failure maps to.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use thiserror::Error;

/* --- constants ------------------------------------------------------------------------------ */

/** exit code for generic failures */
pub const EXIT_FAILURE: i32 = 1;

/** exit code when a required parameter (site, profile, credentials) is missing */
pub const EXIT_MISSING_PARAMS: i32 = 2;

/* --- types ----------------------------------------------------------------------------------- */

///
/// Application error types.
///
/// Uses thiserror for automatic Display and Error trait implementations.
#[derive(Error, Debug)]
pub enum KiiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    MissingParameter(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/* --- start of code -------------------------------------------------------------------------- */

impl KiiError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            KiiError::MissingParameter(_) => EXIT_MISSING_PARAMS,
            _ => EXIT_FAILURE,
        }
    }
}

/// Result type alias for cleaner error handling throughout the application
pub type Result<T> = std::result::Result<T, KiiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_exit_code() {
        let err = KiiError::MissingParameter("missing site".to_string());
        assert_eq!(err.exit_code(), EXIT_MISSING_PARAMS);
        assert_eq!(err.to_string(), "missing site");
    }

    #[test]
    fn test_other_errors_exit_with_failure() {
        assert_eq!(KiiError::Config("bad".to_string()).exit_code(), EXIT_FAILURE);
        assert_eq!(KiiError::Auth("denied".to_string()).exit_code(), EXIT_FAILURE);
    }
}
