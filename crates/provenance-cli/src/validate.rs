//! # validate-pipeline-provenance
//!
//! Validates one provenance YAML file against a JSON Schema.
//! Prints `Provenance file is valid` on success; otherwise prints the
//! violations and exits with [`EXIT_INVALID`].

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use provenance_core::ProvenanceDocument;
use provenance_schema::SchemaValidator;

use crate::{EXIT_INVALID, EXIT_OK};

/// Message printed for a document that passes validation.
pub const VALID_MESSAGE: &str = "Provenance file is valid";

/// Validate a pipeline provenance YAML file against a JSON Schema.
#[derive(Parser, Debug)]
#[command(name = "validate-pipeline-provenance", version)]
pub struct ValidateArgs {
    /// Pipeline provenance YAML file.
    #[arg(short, long, value_name = "PATH")]
    pub provenance: PathBuf,

    /// Schema JSON file.
    #[arg(short, long, value_name = "PATH")]
    pub schema: PathBuf,

    /// Enable verbose logging on stderr. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Execute a single-file validation.
///
/// Returns exit code: 0 when valid, 1 when invalid. Load failures and a
/// malformed schema are returned as errors.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let validator = SchemaValidator::from_file(&args.schema)
        .with_context(|| format!("failed to load JSON schema {}", args.schema.display()))?;
    let document =
        ProvenanceDocument::load(&args.provenance).context("failed to load provenance file")?;

    match validator.validate_document(&document) {
        Ok(()) => {
            println!("{VALID_MESSAGE}");
            Ok(EXIT_OK)
        }
        Err(e) => {
            tracing::info!(provenance = %args.provenance.display(), "provenance file is invalid");
            println!("{e}");
            Ok(EXIT_INVALID)
        }
    }
}
