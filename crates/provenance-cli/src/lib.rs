//! # provenance-cli — Pipeline Provenance Tools
//!
//! Three independent binaries share this library:
//!
//! - `validate-pipeline-provenance` — validate one provenance file.
//! - `validate-test-files` — report expected vs. actual validity for a
//!   directory of fixtures.
//! - `convert-to-ro-crate` — validate one provenance file and project it
//!   into an RO-Crate template.
//!
//! ```bash
//! validate-pipeline-provenance -p provenance.yml -s schemas/pipeline-provenance.schema.json
//! validate-test-files -p fixtures/provenance -s schemas/pipeline-provenance.schema.json
//! convert-to-ro-crate -s schemas/pipeline-provenance.schema.json \
//!     -t templates/ro-crate-metadata.template.json -p provenance.yml
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; rules live in the domain crates.
//! - Stdout carries only results. Logs and errors go to stderr.

pub mod convert;
pub mod logging;
pub mod report;
pub mod validate;

use std::process::ExitCode;

/// The run succeeded.
pub const EXIT_OK: u8 = 0;
/// The provenance document was rejected.
pub const EXIT_INVALID: u8 = 1;
/// An input could not be loaded or the schema is malformed.
pub const EXIT_OPERATIONAL_ERROR: u8 = 2;

/// Map a handler result to a process exit code, logging any error.
pub fn exit_code(result: anyhow::Result<u8>) -> ExitCode {
    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_OPERATIONAL_ERROR)
        }
    }
}
