//! Integration test: run the shipped schema over the shipped fixtures.
//!
//! Every fixture under `fixtures/provenance/` encodes its expected outcome
//! in its file name. A mismatch means either the schema or the fixture
//! drifted.

use std::path::PathBuf;

use provenance_schema::report::{find_provenance_files, report, write_report};
use provenance_schema::{SchemaValidationError, SchemaValidator, Validity};

/// Find the repository root.
fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn fixtures_dir() -> PathBuf {
    repo_root().join("fixtures/provenance")
}

fn shipped_schema() -> SchemaValidator {
    SchemaValidator::from_file(repo_root().join("schemas/pipeline-provenance.schema.json"))
        .expect("shipped schema should compile")
}

#[test]
fn test_every_fixture_matches_its_name() {
    let rows = report(&fixtures_dir(), &shipped_schema());
    assert!(!rows.is_empty(), "no fixtures found in {}", fixtures_dir().display());

    let mismatches: Vec<String> = rows
        .iter()
        .filter(|r| !r.matches_expectation())
        .map(|r| format!("{}: expected {}, got {}", r.file, r.expected_validity, r.actual_validity))
        .collect();
    assert!(
        mismatches.is_empty(),
        "fixtures disagree with their names:\n{}",
        mismatches.join("\n")
    );
}

#[test]
fn test_nested_fixtures_are_discovered() {
    let files = find_provenance_files(&fixtures_dir());
    assert!(files
        .iter()
        .any(|f| f.path.ends_with("process-records/valid_process.yml")));

    let rows = report(&fixtures_dir(), &shipped_schema());
    assert_eq!(rows.len(), files.len());
    assert!(rows.iter().any(|r| r.file == "invalid_tool_extra_field.yml"));
}

#[test]
fn test_missing_version_cites_required_rule() {
    let path = fixtures_dir().join("invalid_missing_pipeline_version.yaml");
    let err = shipped_schema().validate_file(&path).unwrap_err();
    match err {
        SchemaValidationError::ValidationFailed { violations, schema_name } => {
            assert_eq!(schema_name, "pipeline-provenance.schema.json");
            assert_eq!(violations.first().unwrap().instance_path, "/0");
        }
        other => panic!("Expected ValidationFailed, got: {other}"),
    }
}

#[test]
fn test_mapping_root_is_rejected_by_shipped_schema() {
    let path = fixtures_dir().join("invalid_not_a_list.yaml");
    assert!(shipped_schema().validate_file(&path).is_err());
}

#[test]
fn test_report_output_has_one_line_per_fixture() {
    let rows = report(&fixtures_dir(), &shipped_schema());
    let mut out = Vec::new();
    write_report(&rows, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("file\texpected_validity\tactual_validity"));
    assert_eq!(lines.count(), rows.len());
    assert!(text.contains("valid_full.yaml\tvalid\tvalid\n"));
    assert!(text.contains("invalid_unparseable.yaml\tinvalid\tinvalid\n"));
}

#[test]
fn test_scenario_schema_on_single_mapping() {
    let validator = SchemaValidator::from_value(
        "scenario.schema.json",
        serde_json::json!({
            "type": "object",
            "required": ["pipeline_name", "input_filename"],
            "properties": {
                "pipeline_name": { "type": "string" },
                "input_filename": { "type": "string" }
            }
        }),
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("valid_a.yaml"),
        "pipeline_name: demo-pipeline\npipeline_version: 1.0\ninput_filename: reads.fastq\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("invalid_b.yaml"),
        "pipeline_version: 1.0\ninput_filename: reads.fastq\n",
    )
    .unwrap();

    let mut rows = report(dir.path(), &validator);
    rows.sort_by(|a, b| b.file.cmp(&a.file));
    assert_eq!(rows[0].file, "valid_a.yaml");
    assert_eq!(rows[0].actual_validity, Validity::Valid);
    assert_eq!(rows[1].file, "invalid_b.yaml");
    assert_eq!(rows[1].actual_validity, Validity::Invalid);
}
