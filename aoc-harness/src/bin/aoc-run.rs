//! Run every compiled solution and print a summary table
//!
//! Best effort: the exit status is 0 whatever happens to the solutions or the
//! configuration.

use aoc_harness::cli::{self, RunArgs};
use aoc_harness::logging::init_tracing;
use aoc_harness::output::OutputFormatter;
use aoc_harness::{Config, Runner, Unit};
use chrono::Utc;
use std::time::Duration;

fn main() {
    let args: RunArgs = cli::parse_or_exit_with(0);
    init_tracing();

    let config = Config::load_lenient(&args.common);
    let units: Vec<Unit> = match args.day {
        Some(day) => vec![day],
        None => {
            let max = match config.calendar() {
                Ok(calendar) => calendar.runnable_max(Utc::now()),
                Err(e) => {
                    tracing::warn!(error = %e, "running every day");
                    Unit::LAST
                }
            };
            Unit::up_to(max).collect()
        }
    };

    let formatter = OutputFormatter::new(config.year);
    formatter.print_banner();

    let runner = Runner::new(&config.root)
        .with_timeout(Duration::from_secs(args.timeout))
        .with_test_input(args.test);
    let results = runner.run_all(
        units,
        |unit| formatter.print_running(unit),
        |result| formatter.print_status(result),
    );

    formatter.print_summary(&results);
}
