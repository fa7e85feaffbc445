//! # provenance-core — Provenance Document Model
//!
//! Loads pipeline-provenance YAML files into an in-memory JSON value tree
//! and exposes the records a provenance document is made of. Every other
//! crate in the workspace depends on `provenance-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Scalars stay strings.** Provenance YAML is loaded without type
//!    inference: `1.0`, `true` and `2024-01-01` all arrive as strings, so
//!    a schema sees exactly the text a pipeline wrote.
//!
//! 2. **A document is a sequence of records.** A sequence root yields each
//!    mapping element as a record; a mapping root is a single record.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `provenance-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;

pub use document::{ProvenanceDocument, ProvenanceRecord};
pub use error::DocumentError;
