//! AOC HTTP client implementation

use crate::error::AocError;
use crate::parser::ResponseParser;
use reqwest::header::HeaderValue;
use std::time::Duration;
use zeroize::Zeroize;

/// Default site the client talks to
pub const DEFAULT_BASE_URL: &str = "https://adventofcode.com";

/// Direction hint attached to a wrong answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerHint {
    /// The submitted answer is too high
    TooHigh,
    /// The submitted answer is too low
    TooLow,
}

/// Result of an answer submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// Answer was correct
    Correct,
    /// Answer was incorrect
    Incorrect {
        /// Too high / too low, when the site says so
        hint: Option<AnswerHint>,
    },
    /// Problem was already completed
    AlreadyCompleted,
    /// Submission was throttled
    Throttled {
        /// Optional wait time before next submission
        wait_time: Option<Duration>,
    },
    /// Reply matched none of the known verdicts
    Unrecognized {
        /// Leading part of the reply text
        excerpt: String,
    },
}

/// The main AOC HTTP client
///
/// Fetches personalized puzzle inputs and submits answers. The session token
/// is passed to every call rather than stored, so one client can be shared
/// freely.
///
/// # Example
///
/// ```no_run
/// use aoc_http_client::AocClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::new()?;
/// let session = "your_session_cookie";
///
/// let input = client.get_input(2024, 1, session)?;
/// println!("Input: {}", input);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AocClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
    parser: ResponseParser,
}

impl AocClient {
    /// Create a new AOC client with rustls-tls configuration and no redirect policy
    ///
    /// An expired session makes the site redirect to the login page; with
    /// redirects disabled that surfaces as a non-success status instead of a
    /// login page body being saved as puzzle input.
    ///
    /// # Errors
    ///
    /// Returns `AocError::ClientInit` if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, AocError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the AOC client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aoc_http_client::AocClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AocClient::builder()
    ///     .base_url("http://localhost:1234")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> AocClientBuilder {
        AocClientBuilder::new()
    }

    /// Base URL every request is resolved against
    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Create a secure cookie header value from a session string
    ///
    /// The header is flagged sensitive and the temporary string is zeroized.
    fn create_cookie_header(session: &str) -> Result<HeaderValue, AocError> {
        let mut cookie_string = format!("session={}", session);
        let header_value = HeaderValue::from_bytes(cookie_string.as_bytes())
            .map_err(|_| AocError::ClientInit("Invalid session cookie format".to_string()));
        cookie_string.zeroize();

        let mut sensitive_header = header_value?;
        sensitive_header.set_sensitive(true);
        Ok(sensitive_header)
    }

    /// Build `{base}/{year}/day/{day}/{leaf}`
    fn day_url(&self, year: u16, day: u8, leaf: &str) -> Result<reqwest::Url, AocError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AocError::ClientInit("Cannot modify base URL path".to_string()))?
            .clear()
            .extend(&[&year.to_string(), "day", &day.to_string(), leaf]);
        Ok(url)
    }

    /// Fetch puzzle input for a specific year and day
    ///
    /// The body is returned verbatim.
    ///
    /// # Errors
    ///
    /// * `AocError::Request` - Network error
    /// * `AocError::InvalidStatus` - HTTP error (e.g., 404 if puzzle not available)
    /// * `AocError::Encoding` - Response is not valid UTF-8
    pub fn get_input(&self, year: u16, day: u8, session: &str) -> Result<String, AocError> {
        let cookie_header = Self::create_cookie_header(session)?;
        let url = self.day_url(year, day, "input")?;

        let response = self
            .client
            .get(url)
            .header("Cookie", cookie_header)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(AocError::InvalidStatus {
                status,
                body: response.text().unwrap_or_default(),
            });
        }

        response.text().map_err(|_| AocError::Encoding)
    }

    /// Submit an answer for a puzzle part
    ///
    /// Posts `level` and `answer` as a url-encoded form and classifies the
    /// reply. A reply the classifier does not recognize is not an error; it
    /// comes back as [`SubmissionResult::Unrecognized`].
    ///
    /// # Errors
    ///
    /// * `AocError::InvalidPart` - `part` is not 1 or 2 (no request is sent)
    /// * `AocError::Request` - Network error
    /// * `AocError::InvalidStatus` - HTTP error
    /// * `AocError::Encoding` - Response is not valid UTF-8
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aoc_http_client::{AocClient, SubmissionResult};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AocClient::new()?;
    /// let result = client.submit_answer(2024, 1, 1, "42", "your_session_cookie")?;
    /// if result == SubmissionResult::Correct {
    ///     println!("Correct!");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn submit_answer(
        &self,
        year: u16,
        day: u8,
        part: u8,
        answer: &str,
        session: &str,
    ) -> Result<SubmissionResult, AocError> {
        if !(1..=2).contains(&part) {
            return Err(AocError::InvalidPart(part));
        }

        let cookie_header = Self::create_cookie_header(session)?;
        let url = self.day_url(year, day, "answer")?;

        let form = [("level", part.to_string()), ("answer", answer.to_string())];

        let response = self
            .client
            .post(url)
            .header("Cookie", cookie_header)
            .form(&form)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(AocError::InvalidStatus {
                status,
                body: response.text().unwrap_or_default(),
            });
        }

        let html = response.text().map_err(|_| AocError::Encoding)?;
        Ok(self.parser.parse_submission_response(&html))
    }
}

/// Builder for configuring an AOC HTTP client
///
/// The redirect policy is always forced to `Policy::none()`, whatever client
/// builder is supplied.
#[derive(Debug)]
pub struct AocClientBuilder {
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl AocClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            base_url: None,
            client_builder: None,
        }
    }

    /// Set a custom base URL for the client
    ///
    /// Useful for pointing at mock servers. The URL is validated here.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, AocError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set a custom HTTP client builder (timeouts, proxies, ...)
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the AOC client with the configured settings
    pub fn build(self) -> Result<AocClient, AocError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| AocError::ClientInit(e.to_string()))?,
        };

        let builder = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls());

        let client = builder
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AocError::ClientInit(e.to_string()))?;

        Ok(AocClient {
            client,
            base_url,
            parser: ResponseParser::new(),
        })
    }
}

impl Default for AocClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
