//! # convert-to-ro-crate
//!
//! Validates a provenance file, projects it into an RO-Crate template and
//! prints the resulting JSON-LD. Nothing reaches stdout unless the whole
//! conversion succeeded.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use provenance_core::ProvenanceDocument;
use provenance_rocrate::{project, RoCrate};
use provenance_schema::SchemaValidator;

use crate::{EXIT_INVALID, EXIT_OK};

/// Convert pipeline provenance into RO-Crate JSON-LD metadata.
#[derive(Parser, Debug)]
#[command(name = "convert-to-ro-crate", version)]
pub struct ConvertArgs {
    /// Schema JSON file.
    #[arg(short, long, value_name = "PATH")]
    pub schema: PathBuf,

    /// RO-Crate template JSON file.
    #[arg(short = 't', long, value_name = "PATH")]
    pub ro_crate_template: PathBuf,

    /// Pipeline provenance YAML file.
    #[arg(short, long, value_name = "PATH")]
    pub provenance: PathBuf,

    /// Enable verbose logging on stderr. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Execute the conversion.
///
/// Returns exit code: 0 on success, 1 when the provenance is invalid or
/// breaks a projection rule. Load failures are returned as errors.
pub fn run_convert(args: &ConvertArgs) -> Result<u8> {
    let validator = SchemaValidator::from_file(&args.schema)
        .with_context(|| format!("failed to load JSON schema {}", args.schema.display()))?;
    let provenance =
        ProvenanceDocument::load(&args.provenance).context("failed to load provenance file")?;

    if let Err(e) = validator.validate_document(&provenance) {
        eprintln!("{e}");
        return Ok(EXIT_INVALID);
    }

    let template = RoCrate::load(&args.ro_crate_template)?;
    let ro_crate = match project(&provenance, template) {
        Ok(ro_crate) => ro_crate,
        Err(e) if e.is_provenance_error() => {
            eprintln!("{e}");
            return Ok(EXIT_INVALID);
        }
        Err(e) => return Err(e).context("failed to build RO-Crate"),
    };

    let json = ro_crate.to_pretty_json()?;
    writeln!(io::stdout().lock(), "{json}").context("failed to write RO-Crate")?;
    Ok(EXIT_OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const SCHEMA: &str = r#"{
        "type": "object",
        "required": ["pipeline_name", "input_filename"],
        "properties": {
            "pipeline_name": { "type": "string" },
            "input_filename": { "type": "string" }
        }
    }"#;

    const TEMPLATE: &str = r#"{
        "@context": "https://w3id.org/ro/crate/1.1/context",
        "@graph": [ { "@id": "./", "@type": "Dataset" } ]
    }"#;

    fn args(dir: &Path, provenance: &str) -> ConvertArgs {
        let schema = dir.join("schema.json");
        std::fs::write(&schema, SCHEMA).unwrap();
        let template = dir.join("template.json");
        std::fs::write(&template, TEMPLATE).unwrap();
        let path = dir.join("provenance.yml");
        std::fs::write(&path, provenance).unwrap();
        ConvertArgs {
            schema,
            ro_crate_template: template,
            provenance: path,
            verbose: 0,
        }
    }

    #[test]
    fn valid_provenance_converts() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(
            dir.path(),
            "pipeline_name: demo-pipeline\npipeline_version: 1.0\ninput_filename: reads.fastq\n",
        );
        assert_eq!(run_convert(&args).unwrap(), EXIT_OK);
    }

    #[test]
    fn invalid_provenance_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path(), "pipeline_version: 1.0\ninput_filename: reads.fastq\n");
        assert_eq!(run_convert(&args).unwrap(), EXIT_INVALID);
    }

    #[test]
    fn missing_version_breaks_projection() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path(), "pipeline_name: demo\ninput_filename: reads.fastq\n");
        assert_eq!(run_convert(&args).unwrap(), EXIT_INVALID);
    }

    #[test]
    fn template_without_graph_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(
            dir.path(),
            "pipeline_name: demo\npipeline_version: 1\ninput_filename: reads.fastq\n",
        );
        std::fs::write(&args.ro_crate_template, r#"{ "@context": "x" }"#).unwrap();
        assert!(run_convert(&args).is_err());
    }
}
