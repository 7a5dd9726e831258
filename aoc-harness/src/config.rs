//! Configuration resolution from CLI args and the environment

use crate::cli::CommonArgs;
use crate::error::HarnessError;
use crate::unit::EventCalendar;
use aoc_http_client::AocClient;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Session token variable
pub const SESSION_VAR: &str = "AOC_SESSION";
/// Event year override
pub const YEAR_VAR: &str = "AOC_YEAR";
/// Base URL override, for mock servers
pub const BASE_URL_VAR: &str = "AOC_BASE_URL";
/// Event year used when neither `--year` nor `AOC_YEAR` is set
pub const DEFAULT_YEAR: u16 = 2024;

/// Resolved runtime configuration
pub struct Config {
    /// Project root every relative path is resolved against
    pub root: PathBuf,
    /// Event year
    pub year: u16,
    /// Site base URL (None = adventofcode.com)
    pub base_url: Option<String>,
    /// Session key (zeroized on drop)
    pub session: Option<Zeroizing<String>>,
}

impl Config {
    /// Build config from CLI args and the process environment
    ///
    /// A `.env` file in the project root, or else in the working directory,
    /// is loaded first. Variables already set in the environment win.
    pub fn load(args: &CommonArgs) -> Result<Self, HarnessError> {
        load_dotenv(args);
        Self::from_lookup(args, env_lookup)
    }

    /// Like [`Config::load`], but a malformed `AOC_YEAR` falls back to
    /// [`DEFAULT_YEAR`] with a warning instead of failing
    pub fn load_lenient(args: &CommonArgs) -> Self {
        load_dotenv(args);
        Self::from_lookup_lenient(args, env_lookup)
    }

    /// Build config from CLI args and an arbitrary variable lookup
    pub fn from_lookup(
        args: &CommonArgs,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, HarnessError> {
        let year = resolve_year(args, &lookup)?;
        Ok(Self::assemble(args, year, lookup))
    }

    pub fn from_lookup_lenient(
        args: &CommonArgs,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let year = resolve_year(args, &lookup).unwrap_or_else(|e| {
            tracing::warn!(error = %e, fallback = DEFAULT_YEAR, "ignoring event year");
            DEFAULT_YEAR
        });
        Self::assemble(args, year, lookup)
    }

    fn assemble(args: &CommonArgs, year: u16, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let session = lookup(SESSION_VAR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(Zeroizing::new);

        Config {
            root: expand_tilde(&args.root),
            year,
            base_url: lookup(BASE_URL_VAR).filter(|s| !s.is_empty()),
            session,
        }
    }

    /// Session token, or [`HarnessError::MissingSession`]
    pub fn require_session(&self) -> Result<Zeroizing<String>, HarnessError> {
        self.session.clone().ok_or(HarnessError::MissingSession)
    }

    pub fn calendar(&self) -> Result<EventCalendar, HarnessError> {
        EventCalendar::new(self.year)
    }

    /// HTTP client pointed at the configured site
    pub fn client(&self) -> Result<AocClient, HarnessError> {
        let builder = AocClient::builder();
        let builder = match &self.base_url {
            Some(url) => builder.base_url(url.as_str())?,
            None => builder,
        };
        Ok(builder.build()?)
    }
}

/// Load `.env` from the project root, or else the working directory
fn load_dotenv(args: &CommonArgs) {
    let root = expand_tilde(&args.root);
    if dotenvy::from_path(root.join(".env")).is_err() {
        let _ = dotenvy::dotenv();
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// `--year`, then `AOC_YEAR`, then [`DEFAULT_YEAR`]
fn resolve_year(
    args: &CommonArgs,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<u16, HarnessError> {
    match (args.year, lookup(YEAR_VAR)) {
        (Some(year), _) => Ok(year),
        (None, Some(raw)) => raw.trim().parse().map_err(|_| {
            HarnessError::Config(format!("{} must be a year, got '{}'", YEAR_VAR, raw))
        }),
        (None, None) => Ok(DEFAULT_YEAR),
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}
