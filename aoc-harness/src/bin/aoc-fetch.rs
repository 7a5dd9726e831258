//! Download puzzle inputs and submit answers

use aoc_harness::cli::{self, FetchArgs, FetchCommand};
use aoc_harness::logging::init_tracing;
use aoc_harness::output;
use aoc_harness::{Config, Fetcher, FsStorage, HarnessError};
use chrono::Utc;

fn main() {
    let args: FetchArgs = cli::parse_or_exit();
    init_tracing();

    // Network and file failures are reported but do not change the exit status
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: FetchArgs) -> Result<(), HarnessError> {
    let config = Config::load(&args.common)?;
    let session = config.require_session()?;
    let fetcher = Fetcher::new(
        config.client()?,
        session,
        config.calendar()?,
        FsStorage::new(&config.root),
    );
    let now = Utc::now();

    match args.command {
        FetchCommand::Fetch { day, force } => {
            let outcome = if force {
                fetcher.refetch(day, now)
            } else {
                fetcher.fetch(day, now)
            };
            println!("{}", output::describe_fetch(day, &outcome));
        }
        FetchCommand::FetchAll => {
            let max = fetcher.calendar().released_max(now);
            if max == 0 {
                println!("No puzzles are available yet!");
                return Ok(());
            }
            println!("Fetching inputs for days 1-{}...", max);
            fetcher.fetch_all(now, |unit, outcome| {
                println!("{}", output::describe_fetch(unit, outcome));
            });
        }
        FetchCommand::Submit { day, part, answer } => {
            println!("Submitting answer for day {} part {}: {}", day, part, answer);
            let outcome = fetcher.submit(day, part, &answer);
            println!("{}", output::describe_submission(&outcome));
        }
    }

    Ok(())
}
