//! # provenance-schema — Provenance Validation
//!
//! Checks provenance documents against a JSON Schema and reports how a
//! directory of fixture files fares against it.
//!
//! ## Runtime Validation (`validate`)
//!
//! [`SchemaValidator`] loads one schema file, compiles it with the
//! `jsonschema` crate and validates documents against it. A schema that
//! fails to compile is a [`SchemaValidationError::ValidatorBuildError`],
//! never a failed validation.
//!
//! ## Fixture Reports (`report`)
//!
//! [`report::report`] walks a fixture directory, reads the expected
//! outcome from each file name (`valid_*.yaml`, `invalid_*.yml`) and pairs
//! it with the actual outcome. The result is written as TSV by
//! [`report::write_report`].
//!
//! ## Crate Policy
//!
//! - Depends only on `provenance-core` internally.
//! - External `$ref` retrieval is disabled; schemas must be self-contained.

pub mod report;
pub mod validate;

pub use report::{ReportRow, Validity};
pub use validate::{
    SchemaValidationError, SchemaValidator, ValidationOutcome, ValidationViolations, Violation,
};
