//! Sequential batch runner for compiled solutions
//!
//! Each day is classified independently: missing binary, missing input,
//! timeout, failure, or completion with the answers scraped from stdout.
//! Nothing a solution does can stop the batch.

use crate::layout;
use crate::unit::Unit;
use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Wall-clock limit per solution
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Two parts per day, 25 days
pub const MAX_STARS: usize = 50;

const PART1_PREFIX: &str = "Part 1:";
const PART2_PREFIX: &str = "Part 2:";
/// Text some solutions print for a part they have not solved yet
const UNSOLVED_PLACEHOLDER: &str = "None";
const POLL_INTERVAL: Duration = Duration::from_millis(5);
const SPAWN_ATTEMPTS: u32 = 5;

/// Terminal classification of one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Completed { elapsed: Duration },
    NotBuilt,
    NoInput,
    Timeout,
    Failed(String),
}

impl RunStatus {
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            RunStatus::Completed { elapsed } => Some(*elapsed),
            _ => None,
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Completed { elapsed } => write!(f, "{:.2}s", elapsed.as_secs_f64()),
            RunStatus::NotBuilt => f.write_str("Not built"),
            RunStatus::NoInput => f.write_str("No input"),
            RunStatus::Timeout => f.write_str("Timeout"),
            RunStatus::Failed(message) => write!(f, "Error: {}", message),
        }
    }
}

/// Result from a single day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub unit: Unit,
    pub part1: Option<String>,
    pub part2: Option<String>,
    pub status: RunStatus,
}

impl RunResult {
    fn without_answers(unit: Unit, status: RunStatus) -> Self {
        Self {
            unit,
            part1: None,
            part2: None,
            status,
        }
    }

    /// Stars this result counts towards the total
    pub fn solved_parts(&self) -> usize {
        if self.status.elapsed().is_none() {
            return 0;
        }
        [&self.part1, &self.part2]
            .into_iter()
            .filter(|answer| is_present(answer.as_deref()))
            .count()
    }
}

/// An answer counts when it is non-empty and not the unsolved placeholder
pub fn is_present(answer: Option<&str>) -> bool {
    matches!(answer, Some(a) if !a.is_empty() && a != UNSOLVED_PLACEHOLDER)
}

/// Pull the `Part 1:` / `Part 2:` answers out of a solution's stdout
///
/// A later line with the same prefix replaces an earlier one.
pub fn parse_answers(stdout: &str) -> (Option<String>, Option<String>) {
    let mut part1 = None;
    let mut part2 = None;
    for line in stdout.lines() {
        if let Some(rest) = line.strip_prefix(PART1_PREFIX) {
            part1 = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix(PART2_PREFIX) {
            part2 = Some(rest.trim().to_string());
        }
    }
    (part1, part2)
}

/// Totals over a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_elapsed: Duration,
    pub solved: usize,
}

impl Summary {
    pub fn from_results(results: &[RunResult]) -> Self {
        results.iter().fold(Summary::default(), |acc, result| Summary {
            total_elapsed: acc.total_elapsed + result.status.elapsed().unwrap_or_default(),
            solved: acc.solved + result.solved_parts(),
        })
    }
}

/// Runs `build/day{NN}` binaries from a project root
#[derive(Debug, Clone)]
pub struct Runner {
    root: PathBuf,
    timeout: Duration,
    test_input: bool,
}

impl Runner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        // Child processes run with the root as their working directory, so
        // binary paths must not be relative to ours.
        let root = std::path::absolute(&root).unwrap_or(root);
        Self {
            root,
            timeout: DEFAULT_TIMEOUT,
            test_input: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run against `inputs/day{NN}_test.txt`, passing `test` to each binary
    pub fn with_test_input(mut self, test_input: bool) -> Self {
        self.test_input = test_input;
        self
    }

    fn input_path(&self, unit: Unit) -> PathBuf {
        if self.test_input {
            layout::test_input_path(unit)
        } else {
            layout::input_path(unit)
        }
    }

    /// Run every day in `units` in order
    ///
    /// `on_start` is called before a day is attempted and `on_finish` with
    /// its result.
    pub fn run_all<I, S, F>(&self, units: I, mut on_start: S, mut on_finish: F) -> Vec<RunResult>
    where
        I: IntoIterator<Item = Unit>,
        S: FnMut(Unit),
        F: FnMut(&RunResult),
    {
        units
            .into_iter()
            .map(|unit| {
                on_start(unit);
                let result = self.run_unit(unit);
                on_finish(&result);
                result
            })
            .collect()
    }

    /// Run a single day
    pub fn run_unit(&self, unit: Unit) -> RunResult {
        let binary = self.root.join(layout::binary_path(unit));
        if !binary.exists() {
            return RunResult::without_answers(unit, RunStatus::NotBuilt);
        }
        if !self.root.join(self.input_path(unit)).exists() {
            return RunResult::without_answers(unit, RunStatus::NoInput);
        }

        match self.execute(&binary) {
            Execution::Finished {
                status,
                stdout,
                stderr,
                elapsed,
            } => {
                if !status.success() {
                    tracing::debug!(day = unit.get(), %status, "solution exited with failure");
                    return RunResult::without_answers(
                        unit,
                        RunStatus::Failed(stderr.trim().to_string()),
                    );
                }
                let (part1, part2) = parse_answers(&stdout);
                RunResult {
                    unit,
                    part1,
                    part2,
                    status: RunStatus::Completed { elapsed },
                }
            }
            Execution::TimedOut => {
                tracing::warn!(day = unit.get(), timeout = ?self.timeout, "solution timed out");
                RunResult::without_answers(unit, RunStatus::Timeout)
            }
            Execution::Error(message) => {
                RunResult::without_answers(unit, RunStatus::Failed(message))
            }
        }
    }

    fn execute(&self, binary: &Path) -> Execution {
        let mut command = Command::new(binary);
        if self.test_input {
            command.arg("test");
        }
        command
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let start = Instant::now();
        let mut child = match spawn(&mut command) {
            Ok(child) => child,
            Err(e) => {
                return Execution::Error(format!("Failed to start {}: {}", binary.display(), e));
            }
        };

        // Drain both pipes in the background so a chatty child cannot block
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let status = match wait_with_timeout(&mut child, start, self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => return Execution::TimedOut,
            Err(e) => {
                return Execution::Error(format!("Failed to wait for {}: {}", binary.display(), e));
            }
        };
        let elapsed = start.elapsed();

        // A background process left behind by the solution may keep the pipes
        // open, so the deadline also bounds the wait for output.
        let deadline = start + self.timeout;
        match (collect(stdout, deadline), collect(stderr, deadline)) {
            (Some(stdout), Some(stderr)) => Execution::Finished {
                status,
                stdout,
                stderr,
                elapsed,
            },
            _ => Execution::TimedOut,
        }
    }
}

enum Execution {
    Finished {
        status: ExitStatus,
        stdout: String,
        stderr: String,
        elapsed: Duration,
    },
    TimedOut,
    Error(String),
}

/// Spawn `command`, retrying while the binary is still open for writing
fn spawn(command: &mut Command) -> io::Result<Child> {
    let mut attempt = 1;
    loop {
        match command.spawn() {
            Err(e) if e.kind() == io::ErrorKind::ExecutableFileBusy && attempt < SPAWN_ATTEMPTS => {
                attempt += 1;
                thread::sleep(POLL_INTERVAL * attempt);
            }
            other => return other,
        }
    }
}

/// Poll `child` until it exits or `timeout` has passed since `start`
///
/// Returns `Ok(None)` after killing and reaping a child that ran too long.
fn wait_with_timeout(
    child: &mut Child,
    start: Instant,
    timeout: Duration,
) -> io::Result<Option<ExitStatus>> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) if start.elapsed() >= timeout => {
                let _ = child.kill();
                let _ = child.wait();
                return Ok(None);
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        }
    }
}

/// Read `stream` to its end on a helper thread
///
/// The thread is never joined; a reader still blocked after the deadline is
/// simply abandoned.
fn spawn_reader<R: Read + Send + 'static>(stream: Option<R>) -> Option<Receiver<Vec<u8>>> {
    stream.map(|mut stream| {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = stream.read_to_end(&mut buffer);
            let _ = tx.send(buffer);
        });
        rx
    })
}

/// Output of one reader, or `None` if it is still open at `deadline`
fn collect(reader: Option<Receiver<Vec<u8>>>, deadline: Instant) -> Option<String> {
    let Some(reader) = reader else {
        return Some(String::new());
    };
    let bytes = match reader.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(bytes) => bytes,
        Err(RecvTimeoutError::Timeout) => return None,
        Err(RecvTimeoutError::Disconnected) => Vec::new(),
    };
    Some(String::from_utf8_lossy(&bytes).into_owned())
}
