use anyhow::Context;
use clap::Parser;
use code_contests_apps::utils::logger;
use code_contests_apps::{report_names_and_sources, DelimitedSource};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "print_names_and_sources")]
#[command(about = "Print the source and name of every problem in the given record containers")]
struct Args {
    /// Record containers of length-delimited ContestProblem messages
    #[arg(required = true, value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let count = report_names_and_sources(&DelimitedSource::new(), &args.inputs, &mut out)
        .context("failed to list problems")?;

    tracing::info!("✅ Listed {} problem(s)", count);
    Ok(())
}
