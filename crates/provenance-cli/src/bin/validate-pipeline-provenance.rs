//! Entry point for `validate-pipeline-provenance`.

use std::process::ExitCode;

use clap::Parser;

use provenance_cli::logging::init_tracing;
use provenance_cli::validate::{run_validate, ValidateArgs};

fn main() -> ExitCode {
    let args = ValidateArgs::parse();
    init_tracing(args.verbose);
    provenance_cli::exit_code(run_validate(&args))
}
