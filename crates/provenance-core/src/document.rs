//! # Provenance Documents
//!
//! A provenance document records one pipeline run: which pipeline ran, at
//! which version, on which input files, and which processes it executed.
//! Pipelines write it as YAML, usually as a list of records:
//!
//! ```yaml
//! - pipeline_name: BCCDC-PHL/routine-assembly
//!   pipeline_version: 0.4.5
//! - input_filename: sample-01_R1.fastq.gz
//!   file_type: fastq-input
//! ```
//!
//! ## Loading
//!
//! The YAML is converted into a `serde_json::Value` so it can be checked
//! by a JSON Schema validator. The tree is built straight from parser
//! events, so every scalar keeps the exact text written in the file:
//! `1.10`, `0x1F`, `+1` and `~` all arrive unchanged. An absent value
//! (`key:`) becomes `""`, and an entirely empty document stays `null`.
//!
//! Tags are ignored, aliases are expanded, and when a mapping repeats a
//! key the last value wins.

use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use crate::error::DocumentError;

/// A single record of a provenance document.
pub type ProvenanceRecord = Map<String, Value>;

/// Origin label used for documents parsed from memory.
const INLINE_ORIGIN: &str = "<inline>";

/// A loaded provenance document with string-valued leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvenanceDocument {
    value: Value,
}

impl ProvenanceDocument {
    /// Read and parse a provenance YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Read`] if the file cannot be read,
    /// [`DocumentError::Yaml`] if it is not valid YAML, and
    /// [`DocumentError::Unsupported`] if it has no JSON equivalent (a
    /// non-scalar mapping key, a recursive alias, several documents).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let document = Self::parse(&content, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), "loaded provenance document");
        Ok(document)
    }

    /// Parse provenance YAML held in memory.
    pub fn from_yaml_str(content: &str) -> Result<Self, DocumentError> {
        Self::parse(content, INLINE_ORIGIN)
    }

    fn parse(content: &str, origin: &str) -> Result<Self, DocumentError> {
        let mut builder = StringTreeBuilder::new(content);
        Parser::new_from_str(content)
            .load(&mut builder, true)
            .map_err(|e| DocumentError::Yaml {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;

        let value = builder.finish().map_err(|reason| DocumentError::Unsupported {
            path: origin.to_string(),
            reason,
        })?;

        Ok(Self { value })
    }

    /// The document as a JSON value, ready for schema validation.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Iterate over the records of the document.
    ///
    /// A sequence root yields each mapping element (other elements are
    /// skipped). A mapping root yields itself once. Any other root yields
    /// nothing.
    pub fn records(&self) -> impl Iterator<Item = &ProvenanceRecord> + '_ {
        let items: &[Value] = match &self.value {
            Value::Array(items) => items,
            other => std::slice::from_ref(other),
        };
        items.iter().filter_map(Value::as_object)
    }
}

/// A collection whose children are still being read.
enum Frame {
    Sequence {
        anchor: usize,
        items: Vec<Value>,
    },
    Mapping {
        anchor: usize,
        entries: Map<String, Value>,
        /// Key waiting for its value.
        key: Option<String>,
    },
}

/// Parser event sink that builds a JSON tree of uninterpreted scalars.
struct StringTreeBuilder<'a> {
    source: &'a str,
    stack: Vec<Frame>,
    anchors: HashMap<usize, Value>,
    documents: usize,
    root: Option<Value>,
    error: Option<String>,
}

impl<'a> StringTreeBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            stack: Vec::new(),
            anchors: HashMap::new(),
            documents: 0,
            root: None,
            error: None,
        }
    }

    fn finish(self) -> Result<Value, String> {
        match self.error {
            Some(reason) => Err(reason),
            None => Ok(self.root.unwrap_or(Value::Null)),
        }
    }

    fn fail(&mut self, mark: Marker, reason: &str) {
        self.error = Some(format!(
            "{reason} at line {} column {}",
            mark.line(),
            mark.col() + 1
        ));
    }

    fn open(&mut self, frame: Frame, mark: Marker) {
        if matches!(self.stack.last(), Some(Frame::Mapping { key: None, .. })) {
            self.fail(mark, "mapping keys must be scalars");
            return;
        }
        self.stack.push(frame);
    }

    fn close(&mut self, mark: Marker) {
        let (value, anchor) = match self.stack.pop() {
            Some(Frame::Sequence { anchor, items }) => (Value::Array(items), anchor),
            Some(Frame::Mapping { anchor, entries, .. }) => (Value::Object(entries), anchor),
            None => return,
        };
        self.complete(value, anchor, mark);
    }

    /// Attach a finished node to its parent, or make it the root.
    fn complete(&mut self, value: Value, anchor: usize, mark: Marker) {
        if anchor > 0 {
            self.anchors.insert(anchor, value.clone());
        }
        let Some(parent) = self.stack.last_mut() else {
            self.root = Some(value);
            return;
        };
        let attached = match parent {
            Frame::Sequence { items, .. } => {
                items.push(value);
                true
            }
            Frame::Mapping { entries, key, .. } => match (key.take(), value) {
                // A repeated key replaces the earlier value.
                (Some(k), value) => {
                    entries.insert(k, value);
                    true
                }
                (None, Value::String(k)) => {
                    *key = Some(k);
                    true
                }
                (None, _) => false,
            },
        };
        if !attached {
            self.fail(mark, "mapping keys must be scalars");
        }
    }

    /// The parser reports an absent value as a plain `~`. Only a `~` that
    /// is actually in the source survives; the rest become `""`.
    fn scalar_text(&self, text: String, style: TScalarStyle, mark: Marker) -> String {
        if style == TScalarStyle::Plain && text == "~" && !self.tilde_at(mark) {
            String::new()
        } else {
            text
        }
    }

    fn tilde_at(&self, mark: Marker) -> bool {
        let Some(line) = self.source.lines().nth(mark.line().saturating_sub(1)) else {
            return false;
        };
        // Columns count bytes inside plain scalars and characters elsewhere.
        line.as_bytes().get(mark.col()) == Some(&b'~') || line.chars().nth(mark.col()) == Some('~')
    }
}

impl MarkedEventReceiver for StringTreeBuilder<'_> {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        if self.error.is_some() {
            return;
        }
        match ev {
            Event::DocumentStart => {
                self.documents += 1;
                if self.documents > 1 {
                    self.fail(mark, "expected a single YAML document");
                }
            }
            // Tags carry no meaning for provenance.
            Event::Scalar(text, style, anchor, _tag) => {
                let text = self.scalar_text(text, style, mark);
                self.complete(Value::String(text), anchor, mark);
            }
            Event::Alias(anchor) => match self.anchors.get(&anchor).cloned() {
                Some(value) => self.complete(value, 0, mark),
                None => self.fail(mark, "alias refers to an enclosing node"),
            },
            Event::SequenceStart(anchor, _tag) => self.open(
                Frame::Sequence {
                    anchor,
                    items: Vec::new(),
                },
                mark,
            ),
            Event::MappingStart(anchor, _tag) => self.open(
                Frame::Mapping {
                    anchor,
                    entries: Map::new(),
                    key: None,
                },
                mark,
            ),
            Event::SequenceEnd | Event::MappingEnd => self.close(mark),
            Event::Nothing | Event::StreamStart | Event::StreamEnd | Event::DocumentEnd => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_are_loaded_as_strings() {
        let doc = ProvenanceDocument::from_yaml_str(
            r#"
pipeline_name: demo-pipeline
pipeline_version: 1.0
threads: 8
paired: true
started: 2024-01-01
"#,
        )
        .unwrap();

        assert_eq!(
            doc.as_value(),
            &json!({
                "pipeline_name": "demo-pipeline",
                "pipeline_version": "1.0",
                "threads": "8",
                "paired": "true",
                "started": "2024-01-01",
            })
        );
    }

    #[test]
    fn nested_values_are_converted_recursively() {
        let doc = ProvenanceDocument::from_yaml_str(
            r#"
- process_name: fastp
  tools:
    - tool_name: fastp
      tool_version: 0.23
      parameters:
        - parameter: --cut_tail
          value:
"#,
        )
        .unwrap();

        let tool = &doc.as_value()[0]["tools"][0];
        assert_eq!(tool["tool_version"], "0.23");
        assert_eq!(tool["parameters"][0]["value"], "");
    }

    #[test]
    fn empty_document_is_null() {
        let doc = ProvenanceDocument::from_yaml_str("").unwrap();
        assert_eq!(doc.as_value(), &Value::Null);
        assert_eq!(doc.records().count(), 0);
    }

    #[test]
    fn scalar_mapping_keys_become_strings() {
        let doc = ProvenanceDocument::from_yaml_str("1: one\ntrue: yes\n").unwrap();
        assert_eq!(doc.as_value()["1"], "one");
        assert_eq!(doc.as_value()["true"], "yes");
    }

    #[test]
    fn tags_are_ignored() {
        let doc = ProvenanceDocument::from_yaml_str("name: !custom demo\n").unwrap();
        assert_eq!(doc.as_value()["name"], "demo");
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        let err = ProvenanceDocument::from_yaml_str("pipeline_name: [unclosed\n").unwrap_err();
        assert!(matches!(err, DocumentError::Yaml { .. }), "got: {err}");
        assert_eq!(err.path(), "<inline>");
    }

    #[test]
    fn mapping_root_is_a_single_record() {
        let doc = ProvenanceDocument::from_yaml_str("pipeline_name: demo\n").unwrap();
        let records: Vec<_> = doc.records().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["pipeline_name"], "demo");
    }

    #[test]
    fn sequence_root_yields_mapping_elements_only() {
        let doc = ProvenanceDocument::from_yaml_str(
            r#"
- pipeline_name: demo
- just-a-string
- input_filename: reads.fastq
"#,
        )
        .unwrap();
        let records: Vec<_> = doc.records().collect();
        assert_eq!(records.len(), 2);
        assert!(records[1].contains_key("input_filename"));
    }

    #[test]
    fn scalar_root_has_no_records() {
        let doc = ProvenanceDocument::from_yaml_str("just text\n").unwrap();
        assert_eq!(doc.as_value(), &json!("just text"));
        assert_eq!(doc.records().count(), 0);
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("provenance.yml");
        std::fs::write(&path, "- pipeline_name: demo\n  pipeline_version: 2\n").unwrap();

        let doc = ProvenanceDocument::load(&path).unwrap();
        assert_eq!(doc.as_value(), &json!([{"pipeline_name": "demo", "pipeline_version": "2"}]));
    }

    #[test]
    fn load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let err = ProvenanceDocument::load(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn scalars_keep_their_source_text() {
        let doc = ProvenanceDocument::from_yaml_str(
            r#"
pipeline_version: 1.10
minor: 2.50
flags: 0x1F
offset: +1
reads: 1e3
padded: 007
missing: ~
nothing: null
"#,
        )
        .unwrap();

        assert_eq!(
            doc.as_value(),
            &json!({
                "pipeline_version": "1.10",
                "minor": "2.50",
                "flags": "0x1F",
                "offset": "+1",
                "reads": "1e3",
                "padded": "007",
                "missing": "~",
                "nothing": "null",
            })
        );
    }

    #[test]
    fn absent_values_are_empty_strings() {
        let doc = ProvenanceDocument::from_yaml_str("a:\nb: ~\nc: '~'\nd: {e: }\n").unwrap();
        assert_eq!(doc.as_value()["a"], "");
        assert_eq!(doc.as_value()["b"], "~");
        assert_eq!(doc.as_value()["c"], "~");
        assert_eq!(doc.as_value()["d"]["e"], "");
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let doc = ProvenanceDocument::from_yaml_str("a: 1\na: 2\n").unwrap();
        assert_eq!(doc.as_value(), &json!({ "a": "2" }));
    }

    #[test]
    fn aliases_are_expanded() {
        let doc = ProvenanceDocument::from_yaml_str(
            "- tool: &fastp {tool_name: fastp, tool_version: 0.23.4}\n- tool: *fastp\n",
        )
        .unwrap();
        assert_eq!(doc.as_value()[1]["tool"]["tool_version"], "0.23.4");
        assert_eq!(doc.as_value()[0], doc.as_value()[1]);
    }

    #[test]
    fn non_scalar_keys_are_unsupported() {
        let err = ProvenanceDocument::from_yaml_str("? [a, b]\n: c\n").unwrap_err();
        assert!(matches!(err, DocumentError::Unsupported { .. }), "got: {err}");
    }

    #[test]
    fn several_documents_are_unsupported() {
        let err = ProvenanceDocument::from_yaml_str("a: 1\n---\nb: 2\n").unwrap_err();
        assert!(matches!(err, DocumentError::Unsupported { .. }), "got: {err}");
        assert!(err.to_string().contains("single YAML document"));
    }
}

