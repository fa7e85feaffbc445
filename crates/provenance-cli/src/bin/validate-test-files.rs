//! Entry point for `validate-test-files`.

use std::process::ExitCode;

use clap::Parser;

use provenance_cli::logging::init_tracing;
use provenance_cli::report::{run_report, ReportArgs};

fn main() -> ExitCode {
    let args = ReportArgs::parse();
    init_tracing(args.verbose);
    provenance_cli::exit_code(run_report(&args))
}
