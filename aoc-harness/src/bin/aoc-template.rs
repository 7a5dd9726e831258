//! Generate a solution skeleton and an empty test fixture for a day

use aoc_harness::cli::{self, TemplateArgs, TemplateCommand};
use aoc_harness::logging::init_tracing;
use aoc_harness::output;
use aoc_harness::{Config, FsStorage, HarnessError, TemplateGenerator};

fn main() {
    let args: TemplateArgs = cli::parse_or_exit();
    init_tracing();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: TemplateArgs) -> Result<(), HarnessError> {
    let config = Config::load(&args.common)?;
    let generator = TemplateGenerator::new(FsStorage::new(&config.root), config.year);

    match args.command {
        TemplateCommand::Create { day, lang } => {
            let report = generator.create(day, lang)?;
            println!("{}", output::describe_create(&report));
        }
    }

    Ok(())
}
