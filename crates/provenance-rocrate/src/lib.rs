//! # provenance-rocrate — RO-Crate Projection
//!
//! Turns a validated provenance document into RO-Crate metadata by
//! appending entities to the `@graph` of a template crate:
//!
//! - one pipeline entity (`File`, `SoftwareSourceCode`,
//!   `ComputationalWorkflow`) identified by its GitHub URL, and
//! - one `FormalParameter` entity per input file.
//!
//! Existing graph entries are never removed or reordered, and the
//! template's key order is kept on output.
//!
//! ## Crate Policy
//!
//! - Depends only on `provenance-core` internally. Validation is the
//!   caller's job; projection assumes a document that passed its schema.
//! - The provenance document is read, never mutated.

pub mod entity;
pub mod error;
pub mod project;
pub mod rocrate;

pub use entity::{EntityRef, InputFileMetadata, PipelineMetadata};
pub use error::RoCrateError;
pub use project::{collect_input_file_metadata, collect_pipeline_metadata, project};
pub use rocrate::RoCrate;
