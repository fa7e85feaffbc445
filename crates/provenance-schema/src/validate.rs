//! # Schema Validation
//!
//! Runtime validation of provenance documents against a JSON Schema.
//!
//! The draft is chosen by the schema's own `$schema` keyword (Draft
//! 2020-12 when absent). The schema is compiled once, when the validator
//! is constructed; compiling also checks the schema against its
//! meta-schema, so a malformed schema surfaces here and not as an invalid
//! document.
//!
//! ## Schema Resolution
//!
//! Internal `$ref`s (`#/$defs/<name>`, `#/definitions/<name>`) are
//! resolved by the jsonschema crate natively. Any other `$ref` is
//! rejected by [`OfflineRetriever`]; the validator never touches the
//! network.

use std::fmt;
use std::path::Path;

use jsonschema::{Retrieve, Uri, Validator};
use provenance_core::{DocumentError, ProvenanceDocument};
use serde_json::Value;
use thiserror::Error;

/// Retriever that refuses every external `$ref`.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external schema reference '{}' cannot be retrieved", uri.as_str()).into())
    }
}

/// Error during schema loading or validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The schema file could not be read or is not JSON.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The schema is not a valid JSON Schema.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// The provenance document could not be loaded.
    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl SchemaValidationError {
    /// True when the error concerns the schema rather than the document.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::SchemaLoadError { .. } | Self::ValidatorBuildError { .. }
        )
    }
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating value in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    fn from_error(error: &jsonschema::ValidationError<'_>) -> Self {
        Self {
            instance_path: error.instance_path.to_string(),
            schema_path: error.schema_path.to_string(),
            message: error.to_string(),
        }
    }

    /// The schema keyword that was violated, e.g. `required` or `pattern`.
    pub fn keyword(&self) -> &str {
        self.schema_path.rsplit('/').next().unwrap_or_default()
    }

    /// Instance location, with `(root)` standing for the document itself.
    pub fn location(&self) -> &str {
        if self.instance_path.is_empty() {
            "(root)"
        } else {
            &self.instance_path
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  {}: {} (failed '{}' at {})",
            self.location(),
            self.message,
            self.keyword(),
            self.schema_path
        )
    }
}

/// Collection of validation violations, in the order the validator
/// reported them. Never empty.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The first violation encountered.
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Result of checking one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The document satisfies every constraint of the schema.
    Valid,
    /// The document violates the schema; carries the first violation.
    Invalid(Violation),
}

impl ValidationOutcome {
    /// Returns true for [`ValidationOutcome::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// A compiled JSON Schema for provenance documents.
///
/// Construction loads and compiles the schema; validation never mutates
/// the schema or the document.
pub struct SchemaValidator {
    /// File name (or caller-supplied label) of the schema.
    schema_name: String,
    /// Compiled schema.
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_name", &self.schema_name)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Load a JSON Schema from `path` and compile it.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::SchemaLoadError` if the file cannot be
    /// read or parsed as JSON, and `SchemaValidationError::ValidatorBuildError`
    /// if it is not a valid JSON Schema.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaValidationError> {
        let path = path.as_ref();
        let schema_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_name.clone(),
                reason: format!("cannot read {}: {e}", path.display()),
            }
        })?;
        let schema: Value = serde_json::from_str(&content).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: schema_name.clone(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;

        tracing::debug!(schema = %path.display(), "loaded schema");
        Self::from_value(schema_name, schema)
    }

    /// Compile an in-memory schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidatorBuildError` if the schema
    /// does not compile.
    pub fn from_value(
        schema_name: impl Into<String>,
        schema: Value,
    ) -> Result<Self, SchemaValidationError> {
        let schema_name = schema_name.into();
        let mut opts = jsonschema::options();
        opts.with_retriever(OfflineRetriever);
        let validator =
            opts.build(&schema)
                .map_err(|e| SchemaValidationError::ValidatorBuildError {
                    schema_name: schema_name.clone(),
                    reason: e.to_string(),
                })?;

        Ok(Self {
            schema_name,
            validator,
        })
    }

    /// Name of the schema, used in error messages.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Check an instance and return the outcome with the first violation.
    pub fn check(&self, instance: &Value) -> ValidationOutcome {
        match self.validator.iter_errors(instance).next() {
            None => ValidationOutcome::Valid,
            Some(e) => ValidationOutcome::Invalid(Violation::from_error(&e)),
        }
    }

    /// Validate a parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` with every
    /// violation, first encountered first, if the instance is invalid.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let errors: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation::from_error(&e))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema_name: self.schema_name.clone(),
                violations: ValidationViolations { violations: errors },
            })
        }
    }

    /// Validate a loaded provenance document.
    pub fn validate_document(
        &self,
        document: &ProvenanceDocument,
    ) -> Result<(), SchemaValidationError> {
        self.validate(document.as_value())
    }

    /// Load a provenance YAML file and validate it.
    ///
    /// Returns the document on success so callers can go on to use it.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::Document` if the file cannot be
    /// loaded, `SchemaValidationError::ValidationFailed` if it is invalid.
    pub fn validate_file(&self, path: &Path) -> Result<ProvenanceDocument, SchemaValidationError> {
        let document = ProvenanceDocument::load(path)?;
        self.validate_document(&document)?;
        Ok(document)
    }
}
