//! Error types for the AOC HTTP client

use thiserror::Error;

/// Errors that can occur when using the AOC HTTP client
#[derive(Error, Debug)]
pub enum AocError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid HTTP status code received
    #[error("Invalid HTTP status: {status}")]
    InvalidStatus {
        /// The status code that was received
        status: reqwest::StatusCode,
        /// Response body, kept for display to the user
        body: String,
    },

    /// Failed to decode response as UTF-8
    #[error("Failed to decode response as UTF-8")]
    Encoding,

    /// Part number outside of 1..=2
    #[error("Part must be 1 or 2, got {0}")]
    InvalidPart(u8),

    /// Client initialization failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}
