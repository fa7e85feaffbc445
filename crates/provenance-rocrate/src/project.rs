//! # Provenance Projection
//!
//! Derives RO-Crate entities from the records of a provenance document.
//!
//! - The record carrying `pipeline_name` identifies the pipeline. It must
//!   also carry `pipeline_version`, which is checked for presence only and
//!   does not appear in the output. If several records name a pipeline,
//!   the last one wins.
//! - Every record carrying `input_filename` becomes one input-file entity,
//!   in record order.

use provenance_core::{ProvenanceDocument, ProvenanceRecord};

use crate::entity::{InputFileMetadata, PipelineMetadata};
use crate::error::RoCrateError;
use crate::rocrate::RoCrate;

const PIPELINE_NAME: &str = "pipeline_name";
const PIPELINE_VERSION: &str = "pipeline_version";
const INPUT_FILENAME: &str = "input_filename";

/// Text of `field` in `record`, or `None` when the field is absent.
fn string_field<'a>(
    record: &'a ProvenanceRecord,
    index: usize,
    field: &'static str,
) -> Result<Option<&'a str>, RoCrateError> {
    match record.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or(RoCrateError::NonScalarField {
                record: index,
                field,
            }),
    }
}

/// Build the pipeline entity.
///
/// Without any `pipeline_name` the entity carries only its fixed `@type`
/// and `programmingLanguage`.
///
/// # Errors
///
/// Returns [`RoCrateError::MissingField`] if a record names a pipeline but
/// has no `pipeline_version`, and [`RoCrateError::NonScalarField`] if the
/// name is not a string.
pub fn collect_pipeline_metadata(
    provenance: &ProvenanceDocument,
) -> Result<PipelineMetadata, RoCrateError> {
    let mut pipeline = PipelineMetadata::default();

    for (index, record) in provenance.records().enumerate() {
        let Some(name) = string_field(record, index, PIPELINE_NAME)? else {
            continue;
        };
        if !record.contains_key(PIPELINE_VERSION) {
            return Err(RoCrateError::MissingField {
                record: index,
                present: PIPELINE_NAME,
                missing: PIPELINE_VERSION,
            });
        }
        pipeline.set_pipeline(name);
    }

    Ok(pipeline)
}

/// Build one input-file entity per record carrying `input_filename`.
///
/// # Errors
///
/// Returns [`RoCrateError::NonScalarField`] if a file name is not a string.
pub fn collect_input_file_metadata(
    provenance: &ProvenanceDocument,
) -> Result<Vec<InputFileMetadata>, RoCrateError> {
    let mut input_files = Vec::new();
    for (index, record) in provenance.records().enumerate() {
        if let Some(input_filename) = string_field(record, index, INPUT_FILENAME)? {
            input_files.push(InputFileMetadata::new(input_filename));
        }
    }
    Ok(input_files)
}

/// Append the pipeline entity, then the input-file entities, to `template`.
///
/// Nothing is appended unless every entity could be derived.
pub fn project(
    provenance: &ProvenanceDocument,
    mut template: RoCrate,
) -> Result<RoCrate, RoCrateError> {
    let pipeline = collect_pipeline_metadata(provenance)?;
    let input_files = collect_input_file_metadata(provenance)?;

    template.push_entity(&pipeline)?;
    for input_file in &input_files {
        template.push_entity(input_file)?;
    }

    tracing::debug!(
        pipeline = pipeline.name.as_deref().unwrap_or("<unnamed>"),
        input_files = input_files.len(),
        "projected provenance into RO-Crate"
    );
    Ok(template)
}
