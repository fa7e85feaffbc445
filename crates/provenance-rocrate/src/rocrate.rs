//! # RO-Crate Documents
//!
//! An RO-Crate metadata file is a JSON-LD object whose `@graph` array
//! lists the crate's entities. [`RoCrate`] wraps such an object, checks
//! the `@graph` on construction and only ever appends to it.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::RoCrateError;

const GRAPH_KEY: &str = "@graph";

/// An RO-Crate JSON-LD document.
#[derive(Debug, Clone, PartialEq)]
pub struct RoCrate {
    document: Value,
}

impl RoCrate {
    /// Load a template crate from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RoCrateError::TemplateLoad`] if the file cannot be read or
    /// parsed, [`RoCrateError::MissingGraph`] if it has no `@graph` array.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RoCrateError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| RoCrateError::TemplateLoad {
                path: path.display().to_string(),
                reason: format!("cannot read file: {e}"),
            })?;
        let document: Value =
            serde_json::from_str(&content).map_err(|e| RoCrateError::TemplateLoad {
                path: path.display().to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;

        let crate_doc = Self::from_value(document)?;
        tracing::debug!(
            template = %path.display(),
            entities = crate_doc.graph().len(),
            "loaded RO-Crate template"
        );
        Ok(crate_doc)
    }

    /// Wrap a JSON value that must be an object with an `@graph` array.
    pub fn from_value(document: Value) -> Result<Self, RoCrateError> {
        if document.get(GRAPH_KEY).is_some_and(Value::is_array) {
            Ok(Self { document })
        } else {
            Err(RoCrateError::MissingGraph)
        }
    }

    /// Entities of the crate, in order.
    pub fn graph(&self) -> &[Value] {
        self.document
            .get(GRAPH_KEY)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Append one entity to the end of `@graph`.
    pub fn push_entity<T: Serialize>(&mut self, entity: &T) -> Result<(), RoCrateError> {
        let value = serde_json::to_value(entity)?;
        self.document
            .get_mut(GRAPH_KEY)
            .and_then(Value::as_array_mut)
            .ok_or(RoCrateError::MissingGraph)?
            .push(value);
        Ok(())
    }

    /// Render as JSON indented by two spaces, without a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String, RoCrateError> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }
}
