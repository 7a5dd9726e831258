//! Submission response classification
//!
//! The reply to an answer submission is an HTML page whose `<main>` element
//! carries a human readable verdict. Classification walks an ordered rule
//! table and the first rule whose predicate matches decides the outcome.

use crate::client::{AnswerHint, SubmissionResult};
use regex::Regex;
use scraper::{Html, Selector};
use std::cell::OnceCell;
use std::time::Duration;

/// Maximum number of characters kept from an unrecognized reply
pub const EXCERPT_LIMIT: usize = 500;

/// A single (predicate, outcome) pair of the classification table
struct Rule {
    /// Substring that must appear in the lowercased reply text
    needle: &'static str,
    /// Builds the outcome from the parser and the lowercased reply text
    outcome: fn(&ResponseParser, &str) -> SubmissionResult,
}

/// Classification table, evaluated top to bottom
const RULES: &[Rule] = &[
    Rule {
        needle: "that's the right answer",
        outcome: |_, _| SubmissionResult::Correct,
    },
    Rule {
        needle: "already complete",
        outcome: |_, _| SubmissionResult::AlreadyCompleted,
    },
    Rule {
        needle: "you gave an answer too recently",
        outcome: |parser, text| SubmissionResult::Throttled {
            wait_time: parser.extract_throttle_duration(text),
        },
    },
    Rule {
        needle: "that's not the right answer",
        outcome: |_, text| SubmissionResult::Incorrect {
            hint: answer_hint(text),
        },
    },
];

fn answer_hint(text: &str) -> Option<AnswerHint> {
    if text.contains("too high") {
        Some(AnswerHint::TooHigh)
    } else if text.contains("too low") {
        Some(AnswerHint::TooLow)
    } else {
        None
    }
}

/// Parser for AOC HTML responses with cached regex patterns and selectors
#[derive(Clone, Debug)]
pub(crate) struct ResponseParser {
    throttle_regex: OnceCell<Regex>,
    main_selector: OnceCell<Selector>,
}

impl ResponseParser {
    /// Create a new parser with uninitialized caches
    pub fn new() -> Self {
        Self {
            throttle_regex: OnceCell::new(),
            main_selector: OnceCell::new(),
        }
    }

    /// Get or compile the throttle duration regex (matched against lowercased text)
    fn throttle_regex(&self) -> &Regex {
        self.throttle_regex
            .get_or_init(|| Regex::new(r"you have (.+?) left to wait\.").unwrap())
    }

    /// Get or compile the main element selector
    fn main_selector(&self) -> &Selector {
        self.main_selector.get_or_init(|| Selector::parse("main").unwrap())
    }

    /// Extract text content of the `<main>` element, or of the whole document
    /// when the reply has no `<main>`
    pub fn extract_main_text(&self, html: &str) -> String {
        let document = Html::parse_document(html);

        match document.select(self.main_selector()).next() {
            Some(main) => main.text().collect(),
            None => document.root_element().text().collect(),
        }
    }

    /// Extract throttle duration from lowercased response text
    fn extract_throttle_duration(&self, text: &str) -> Option<Duration> {
        let captures = self.throttle_regex().captures(text)?;
        let duration_str = captures.get(1)?.as_str();
        humantime::parse_duration(duration_str).ok()
    }

    /// Classify a submission reply
    pub fn parse_submission_response(&self, html: &str) -> SubmissionResult {
        let text = self.extract_main_text(html);
        let lowered = text.to_lowercase();

        RULES
            .iter()
            .find(|rule| lowered.contains(rule.needle))
            .map(|rule| (rule.outcome)(self, &lowered))
            .unwrap_or_else(|| SubmissionResult::Unrecognized {
                excerpt: text.trim().chars().take(EXCERPT_LIMIT).collect(),
            })
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}
