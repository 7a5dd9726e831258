//! Advent of Code harness
//!
//! Library behind three small tools:
//!
//! - `aoc-fetch` downloads puzzle inputs and submits answers, refusing to ask
//!   for a day before it unlocks
//! - `aoc-template` writes a solution skeleton and an empty test fixture
//! - `aoc-run` runs every compiled `build/dayNN` binary with a time limit and
//!   prints a summary table of the answers
//!
//! Everything that touches the clock, the filesystem or the network takes it
//! as an argument, so the tools are thin wrappers over this crate.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod layout;
pub mod logging;
pub mod output;
pub mod runner;
pub mod storage;
pub mod template;
pub mod unit;

pub use config::Config;
pub use error::HarnessError;
pub use fetcher::{FetchOutcome, Fetcher, SubmitOutcome};
pub use runner::{RunResult, RunStatus, Runner, Summary};
pub use storage::{FsStorage, MemoryStorage, Storage};
pub use template::{CreateReport, FileAction, Language, TemplateGenerator};
pub use unit::{EventCalendar, Stage, Unit};
