//! Console output for the three tools

use crate::fetcher::{FetchOutcome, SubmitOutcome};
use crate::runner::{MAX_STARS, RunResult, RunStatus, Summary};
use crate::template::{CreateReport, FileAction};
use crate::unit::Unit;
use aoc_http_client::{AnswerHint, SubmissionResult};
use std::fmt::Write as _;
use std::io::Write as _;
use std::time::Duration;

const RULE_WIDTH: usize = 50;
const MISSING_ANSWER: &str = "—";

/// Output formatter for batch run results
pub struct OutputFormatter {
    year: u16,
}

impl OutputFormatter {
    pub fn new(year: u16) -> Self {
        Self { year }
    }

    pub fn print_banner(&self) {
        println!("🎄 Advent of Code {} - All Solutions 🎄", self.year);
        println!("{}", "=".repeat(RULE_WIDTH));
    }

    /// First half of a progress line, completed by [`Self::print_status`]
    pub fn print_running(&self, unit: Unit) {
        print!("Running Day {:02}... ", unit.get());
        std::io::stdout().flush().ok();
    }

    pub fn print_status(&self, result: &RunResult) {
        println!("[{}]", result.status);
    }

    pub fn print_summary(&self, results: &[RunResult]) {
        print!("{}", render_summary(results));
    }
}

/// Summary table followed by totals
pub fn render_summary(results: &[RunResult]) -> String {
    let summary = Summary::from_results(results);
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let header = format!("{:<5} {:<20} {:<20} {:<10}", "Day", "Part 1", "Part 2", "Time");
    let _ = writeln!(out, "{}", header.trim_end());
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    for result in results {
        let row = format!(
            "{:02}    {:<20} {:<20} {:<10}",
            result.unit.get(),
            result.part1.as_deref().filter(|a| !a.is_empty()).unwrap_or(MISSING_ANSWER),
            result.part2.as_deref().filter(|a| !a.is_empty()).unwrap_or(MISSING_ANSWER),
            short_status(&result.status),
        );
        let _ = writeln!(out, "{}", row.trim_end());
    }

    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    let _ = writeln!(out, "Total solved: {}/{}", summary.solved, MAX_STARS);
    let _ = writeln!(out, "Total time: {:.2}s", summary.total_elapsed.as_secs_f64());
    out
}

/// Status cell of the table; error text is cut to its first line
fn short_status(status: &RunStatus) -> String {
    match status {
        RunStatus::Failed(message) => {
            let first = message.lines().next().unwrap_or_default();
            format!("Error: {}", first)
        }
        other => other.to_string(),
    }
}

/// One-line report of a fetch
pub fn describe_fetch(unit: Unit, outcome: &FetchOutcome) -> String {
    match outcome {
        FetchOutcome::Saved { path, bytes } => {
            format!("Day {}: saved {} bytes to {}", unit, bytes, path.display())
        }
        FetchOutcome::AlreadyPresent(path) => {
            format!("Day {}: already exists at {}, skipping", unit, path.display())
        }
        FetchOutcome::NotReleased { unlocks_at } => format!(
            "Day {} hasn't been released yet!\nPuzzle unlocks at: {}",
            unit,
            unlocks_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        FetchOutcome::Failed(reason) => {
            format!("Day {}: failed to fetch input: {}", unit, reason)
        }
    }
}

/// Report of a submission
pub fn describe_submission(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Verdict(result) => format_verdict(result),
        SubmitOutcome::Failed(reason) => format!("Failed to submit: {}", reason),
    }
}

fn format_verdict(result: &SubmissionResult) -> String {
    match result {
        SubmissionResult::Correct => "✅ Correct answer!".to_string(),
        SubmissionResult::Incorrect { hint } => match hint {
            Some(AnswerHint::TooHigh) => {
                "❌ Wrong answer!\n   (Your answer is too high)".to_string()
            }
            Some(AnswerHint::TooLow) => "❌ Wrong answer!\n   (Your answer is too low)".to_string(),
            None => "❌ Wrong answer!".to_string(),
        },
        SubmissionResult::AlreadyCompleted => "✓ You've already solved this!".to_string(),
        SubmissionResult::Throttled { wait_time } => match wait_time {
            Some(d) => format!(
                "⏰ Please wait before submitting again ({} left)",
                format_wait(*d)
            ),
            None => "⏰ Please wait before submitting again".to_string(),
        },
        SubmissionResult::Unrecognized { excerpt } => format!("? Unknown response:\n{}", excerpt),
    }
}

fn format_wait(d: Duration) -> String {
    let secs = d.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

/// Report of a template run
pub fn describe_create(report: &CreateReport) -> String {
    let mut lines = Vec::new();
    match &report.source {
        FileAction::Created(path) => lines.push(format!("Created: {}", path.display())),
        FileAction::AlreadyExists(path) => {
            lines.push(format!("Solution file already exists: {}", path.display()))
        }
    }
    if let FileAction::Created(path) = &report.fixture {
        lines.push(format!("Created: {}", path.display()));
    }
    lines.join("\n")
}
