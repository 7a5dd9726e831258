//! CLI argument parsing using clap

use crate::template::Language;
use crate::unit::{Stage, Unit};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Options shared by every tool
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Project root holding inputs/, build/ and src/
    #[arg(long, default_value = ".", global = true)]
    pub root: PathBuf,

    /// Event year (defaults to AOC_YEAR, then 2024)
    #[arg(short, long, global = true)]
    pub year: Option<u16>,
}

/// Run every built solution and tabulate the answers
#[derive(Parser, Debug)]
#[command(name = "aoc-run", version)]
pub struct RunArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Run against inputs/dayNN_test.txt, passing `test` to each binary
    #[arg(long)]
    pub test: bool,

    /// Per-solution time limit in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Only run this day
    #[arg(short, long)]
    pub day: Option<Unit>,
}

/// Fetch puzzle inputs and submit answers
#[derive(Parser, Debug)]
#[command(name = "aoc-fetch", version, arg_required_else_help = true)]
pub struct FetchArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: FetchCommand,
}

#[derive(Subcommand, Debug)]
pub enum FetchCommand {
    /// Fetch input for a day
    Fetch {
        /// Day number (1-25)
        day: Unit,

        /// Replace an input file that already exists
        #[arg(long)]
        force: bool,
    },
    /// Fetch all available inputs
    FetchAll,
    /// Submit an answer
    Submit {
        /// Day number (1-25)
        day: Unit,
        /// Part number (1 or 2)
        part: Stage,
        /// Answer text
        answer: String,
    },
}

/// Generate solution skeletons
#[derive(Parser, Debug)]
#[command(name = "aoc-template", version, arg_required_else_help = true)]
pub struct TemplateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: TemplateCommand,
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// Create solution template and empty test input for a day
    Create {
        /// Day number (1-25)
        day: Unit,

        /// Skeleton language
        #[arg(long, value_enum, default_value = "c")]
        lang: Language,
    },
}

/// Parse arguments, exiting with status 1 on a usage error
///
/// `--help` and `--version` still exit with 0.
pub fn parse_or_exit<T: Parser>() -> T {
    parse_or_exit_with(1)
}

/// Parse arguments, exiting with `usage_status` on a usage error
pub fn parse_or_exit_with<T: Parser>(usage_status: i32) -> T {
    T::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(exit_status(&e, usage_status))
    })
}

fn exit_status(error: &clap::Error, usage_status: i32) -> i32 {
    if error.use_stderr() { usage_status } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn test_commands_are_well_formed() {
        RunArgs::command().debug_assert();
        FetchArgs::command().debug_assert();
        TemplateArgs::command().debug_assert();
    }

    #[test]
    fn test_run_takes_no_required_arguments() {
        let args = RunArgs::try_parse_from(["aoc-run"]).unwrap();
        assert!(!args.test);
        assert_eq!(args.timeout, 30);
        assert!(args.day.is_none());
        assert_eq!(args.common.root, PathBuf::from("."));
    }

    #[test]
    fn test_fetch_subcommands() {
        let args = FetchArgs::try_parse_from(["aoc-fetch", "fetch", "3"]).unwrap();
        assert!(matches!(
            args.command,
            FetchCommand::Fetch { day, force: false } if day.get() == 3
        ));

        let args = FetchArgs::try_parse_from(["aoc-fetch", "fetch-all"]).unwrap();
        assert!(matches!(args.command, FetchCommand::FetchAll));

        let args = FetchArgs::try_parse_from(["aoc-fetch", "submit", "1", "2", "1234"]).unwrap();
        match args.command {
            FetchCommand::Submit { day, part, answer } => {
                assert_eq!(day.get(), 1);
                assert_eq!(part, Stage::Two);
                assert_eq!(answer, "1234");
            }
            other => panic!("Expected Submit, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_usage_errors() {
        let err = FetchArgs::try_parse_from(["aoc-fetch", "fetch"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.use_stderr());

        let err = FetchArgs::try_parse_from(["aoc-fetch", "submit", "1", "3", "9"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let err = FetchArgs::try_parse_from(["aoc-fetch", "fetch", "26"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let err = FetchArgs::try_parse_from(["aoc-fetch", "frobnicate"]).unwrap_err();
        assert!(err.use_stderr());

        let err = FetchArgs::try_parse_from(["aoc-fetch"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_run_usage_error_status_is_configurable() {
        let err = RunArgs::try_parse_from(["aoc-run", "--day", "30"]).unwrap_err();
        assert_eq!(exit_status(&err, 0), 0);
        assert_eq!(exit_status(&err, 1), 1);

        let help = RunArgs::try_parse_from(["aoc-run", "--help"]).unwrap_err();
        assert_eq!(exit_status(&help, 1), 0);
    }

    #[test]
    fn test_template_create() {
        let args = TemplateArgs::try_parse_from(["aoc-template", "create", "12"]).unwrap();
        let TemplateCommand::Create { day, lang } = args.command;
        assert_eq!(day.get(), 12);
        assert_eq!(lang, Language::C);

        let args = TemplateArgs::try_parse_from(["aoc-template", "create", "1", "--lang", "rust"])
            .unwrap();
        let TemplateCommand::Create { lang, .. } = args.command;
        assert_eq!(lang, Language::Rust);

        assert!(TemplateArgs::try_parse_from(["aoc-template", "create"]).is_err());
    }
}
