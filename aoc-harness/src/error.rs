//! Error types for the harness

use thiserror::Error;

/// Main harness error type
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No session token in the environment or `.env`
    #[error(
        "AOC_SESSION not found in environment or .env file\n\
         Please add your session cookie to .env file:\n\
         AOC_SESSION=<your-session-cookie>"
    )]
    MissingSession,

    /// Day number outside 1..=25 or not a number
    #[error("Invalid day '{0}': expected a number from 1 to 25")]
    InvalidUnit(String),

    /// Part number other than 1 or 2
    #[error("Part must be 1 or 2, got '{0}'")]
    InvalidStage(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] aoc_http_client::AocError),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
