//! AOC HTTP client library
//!
//! Blocking client for the Advent of Code website: personalized puzzle input
//! retrieval and answer submission with classification of the site's reply.
//!
//! # Features
//!
//! - Puzzle input fetching for any year and day
//! - Answer submission classified through an ordered rule table
//!   (correct, already completed, throttled, incorrect with too-high/too-low hint,
//!   unrecognized)
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Session cookie header marked sensitive and zeroized after use
//! - Configurable base URL for testing against mock servers
//!
//! # Example
//!
//! ```no_run
//! use aoc_http_client::{AocClient, SubmissionResult};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AocClient::new()?;
//! let session = "your_session_cookie_here";
//!
//! let input = client.get_input(2024, 1, session)?;
//!
//! match client.submit_answer(2024, 1, 1, "42", session)? {
//!     SubmissionResult::Correct => println!("Correct!"),
//!     SubmissionResult::Incorrect { hint } => println!("Incorrect ({:?})", hint),
//!     SubmissionResult::AlreadyCompleted => println!("Already done"),
//!     SubmissionResult::Throttled { wait_time } => println!("Throttled: {:?}", wait_time),
//!     SubmissionResult::Unrecognized { excerpt } => println!("?? {}", excerpt),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod parser;

pub use client::{AnswerHint, AocClient, AocClientBuilder, DEFAULT_BASE_URL, SubmissionResult};
pub use error::AocError;
pub use parser::EXCERPT_LIMIT;
