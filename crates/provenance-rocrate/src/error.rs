use thiserror::Error;

/// Error while loading a template or projecting provenance into it.
#[derive(Error, Debug)]
pub enum RoCrateError {
    /// The template file could not be read or is not JSON.
    #[error("cannot load RO-Crate template '{path}': {reason}")]
    TemplateLoad {
        /// Path of the template.
        path: String,
        /// Reason the template could not be loaded.
        reason: String,
    },

    /// The template is not an object with an `@graph` array.
    #[error("RO-Crate template must be a JSON object with an '@graph' array")]
    MissingGraph,

    /// A record has one field of a required pair but not the other.
    #[error("provenance record {record} has '{present}' but no '{missing}'")]
    MissingField {
        /// Zero-based index of the record.
        record: usize,
        /// Field that was found.
        present: &'static str,
        /// Field that should accompany it.
        missing: &'static str,
    },

    /// A projected field holds a mapping or sequence instead of text.
    #[error("provenance record {record}: '{field}' must be a string")]
    NonScalarField {
        /// Zero-based index of the record.
        record: usize,
        /// Name of the field.
        field: &'static str,
    },

    /// An entity or the finished crate could not be serialized.
    #[error("RO-Crate serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RoCrateError {
    /// True when the provenance itself broke a projection rule, as opposed
    /// to a template or serialization failure.
    pub fn is_provenance_error(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::NonScalarField { .. })
    }
}
