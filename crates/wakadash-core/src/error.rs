//! Error types for wakadash
//!
//! This module defines the error type shared by every wakadash crate.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use wakadash_core::error::{DashError, Result};
//!
//! fn read_template() -> Result<String> {
//!     // io::Error converts into DashError::Io through `?`
//!     let template = std::fs::read_to_string("nonexistent.svg")?;
//!     Ok(template)
//! }
//!
//! assert!(matches!(read_template(), Err(DashError::Io(_))));
//! ```

use thiserror::Error;

/// Main error type for wakadash operations
///
/// Fatal configuration problems (missing credentials, bad timezone strings)
/// and fatal network problems (transport errors, non-success status codes)
/// are both represented here. Malformed individual records never become a
/// `DashError`; the aggregator skips them instead.
#[derive(Error, Debug)]
pub enum DashError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote service answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Http {
        /// Status code returned by the server
        status: u16,
        /// Request URL, without query credentials
        url: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DashError {
    /// Build the error reported when a required environment variable is unset
    pub fn missing_env(var: &str) -> Self {
        Self::Config(format!("{var} not found in environment variables"))
    }
}

/// Convenience type alias for Results in wakadash
pub type Result<T> = std::result::Result<T, DashError>;
