//! # RO-Crate Entities
//!
//! Typed forms of the entities the projector adds to a crate's `@graph`.
//! Field order is the order keys appear in the emitted JSON.

use serde::Serialize;

/// Host that pipeline names are resolved against.
pub const PIPELINE_HOST: &str = "https://github.com";

/// Workflow-language term for Nextflow pipelines.
pub const NEXTFLOW_LANGUAGE: &str = "https://w3id.org/workflowhub/workflow-ro-crate#nextflow";

/// Bioschemas profile input-file parameters conform to.
pub const FORMAL_PARAMETER_PROFILE: &str =
    "https://bioschemas.org/profiles/FormalParameter/1.0-RELEASE";

/// `@type` of the pipeline entity.
pub const PIPELINE_TYPES: [&str; 3] = ["File", "SoftwareSourceCode", "ComputationalWorkflow"];

/// A JSON-LD reference: `{"@id": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    #[serde(rename = "@id")]
    pub id: String,
}

impl EntityRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// The workflow that produced the provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineMetadata {
    #[serde(rename = "@type")]
    pub types: [&'static str; 3],
    pub programming_language: EntityRef,
    /// GitHub URL of the pipeline; absent when no record names one.
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for PipelineMetadata {
    fn default() -> Self {
        Self {
            types: PIPELINE_TYPES,
            programming_language: EntityRef::new(NEXTFLOW_LANGUAGE),
            id: None,
            name: None,
        }
    }
}

impl PipelineMetadata {
    /// Identify the entity as the pipeline `name`.
    pub fn set_pipeline(&mut self, name: &str) {
        self.id = Some(pipeline_id(name));
        self.name = Some(name.to_string());
    }
}

/// `@id` of a pipeline: its name as a path under [`PIPELINE_HOST`].
///
/// Leading slashes are dropped, so `/owner/repo` still lands under the host.
pub fn pipeline_id(name: &str) -> String {
    format!("{PIPELINE_HOST}/{}", name.trim_start_matches('/'))
}

/// An input file of the pipeline run, described as a formal parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputFileMetadata {
    /// No identifier can be derived for input files yet, so this stays
    /// `None` and serializes as `null`.
    #[serde(rename = "@id")]
    pub id: Option<String>,
    #[serde(rename = "@type")]
    pub entity_type: &'static str,
    pub additional_type: &'static str,
    pub conforms_to: EntityRef,
    pub name: String,
}

impl InputFileMetadata {
    pub fn new(input_filename: impl Into<String>) -> Self {
        Self {
            id: None,
            entity_type: "FormalParameter",
            additional_type: "File",
            conforms_to: EntityRef::new(FORMAL_PARAMETER_PROFILE),
            name: input_filename.into(),
        }
    }
}
