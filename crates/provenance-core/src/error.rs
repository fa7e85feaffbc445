//! # Error Types
//!
//! Errors raised while reading a provenance document from disk. Each
//! variant records the path (or `<inline>` for in-memory sources) so the
//! message is useful on its own when printed by a CLI.

use thiserror::Error;

/// A provenance document could not be loaded.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Read {
        /// Path of the document.
        path: String,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed YAML.
    #[error("invalid YAML in '{path}': {reason}")]
    Yaml {
        /// Path of the document.
        path: String,
        /// Parser message, including line and column when known.
        reason: String,
    },

    /// The YAML uses a construct that has no JSON equivalent.
    #[error("unsupported YAML in '{path}': {reason}")]
    Unsupported {
        /// Path of the document.
        path: String,
        /// Description of the offending construct.
        reason: String,
    },
}

impl DocumentError {
    /// Path (or origin label) of the document that failed to load.
    pub fn path(&self) -> &str {
        match self {
            Self::Read { path, .. } | Self::Yaml { path, .. } | Self::Unsupported { path, .. } => {
                path
            }
        }
    }
}
