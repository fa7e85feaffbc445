//! Entry point for `convert-to-ro-crate`.

use std::process::ExitCode;

use clap::Parser;

use provenance_cli::convert::{run_convert, ConvertArgs};
use provenance_cli::logging::init_tracing;

fn main() -> ExitCode {
    let args = ConvertArgs::parse();
    init_tracing(args.verbose);
    provenance_cli::exit_code(run_convert(&args))
}
